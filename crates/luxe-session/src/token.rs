//! Session identifier generation

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 5;
const SUFFIX_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build a new session identifier: the current Unix-epoch milliseconds and
/// a short random base-36 suffix, base64-encoded.
///
/// Uniqueness is probabilistic only; same-millisecond calls are told apart
/// by the suffix.
pub fn make_session_id() -> String {
    let raw = format!("{}-{}", Utc::now().timestamp_millis(), random_suffix());
    STANDARD.encode(raw)
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_non_empty_and_distinct() {
        let a = make_session_id();
        let b = make_session_id();

        assert!(!a.is_empty());
        assert!(!b.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_decodes_to_timestamp_and_suffix() {
        let id = make_session_id();
        let raw = String::from_utf8(STANDARD.decode(&id).unwrap()).unwrap();

        let (millis, suffix) = raw.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| SUFFIX_CHARS.contains(&b)));
    }
}
