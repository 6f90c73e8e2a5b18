#[cfg(test)]
mod utils_tests {
    use chrono::{TimeZone, Utc};

    use lz4_session::{
        types::Mode,
        utils::{decode_base64, default_filename, encode_base64, filename_for_mode, is_likely_base64, round_to},
    };

    #[test]
    fn base64_roundtrip_and_heuristic() {
        let encoded = encode_base64(b"hello");
        assert_eq!(encoded, "aGVsbG8=");
        assert_eq!(decode_base64(&encoded).unwrap(), b"hello");
        assert!(decode_base64("not base64!!").is_err());

        assert!(is_likely_base64("aGVsbG8="));
        assert!(is_likely_base64(""));
        assert!(!is_likely_base64("hello"));
        assert!(!is_likely_base64("aGVs bG8="));
        assert!(!is_likely_base64("a==="));
    }

    #[test]
    fn rounding_handles_non_finite() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(f64::NAN, 3), 0.0);
        assert_eq!(round_to(f64::INFINITY, 3), 0.0);
    }

    #[test]
    fn extension_policy() {
        assert_eq!(filename_for_mode("a.txt", Mode::Compress), "a.txt.lz4");
        assert_eq!(filename_for_mode("a.txt.lz4", Mode::Compress), "a.txt.lz4");
        assert_eq!(filename_for_mode("a.txt.lz4", Mode::Decompress), "a.txt");
        assert_eq!(filename_for_mode("a.txt", Mode::Decompress), "a.txt");
    }

    #[test]
    fn default_names_have_no_colons_or_dots_in_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap();
        assert_eq!(default_filename(Mode::Compress, at), "untitled-2024-05-01T12-30-45-000Z.txt");
        assert_eq!(default_filename(Mode::Decompress, at), "compressed-2024-05-01T12-30-45-000Z.lz4");
    }

    #[test]
    fn mode_flags() {
        assert_eq!(Mode::Compress.flag(), "c");
        assert_eq!(Mode::from_flag("c"), Mode::Compress);
        assert_eq!(Mode::from_flag("d"), Mode::Decompress);
        assert_eq!(Mode::from_flag(""), Mode::Decompress);
        assert_eq!(Mode::Compress.toggled(), Mode::Decompress);
        assert_eq!(Mode::Decompress.to_string(), "decompress");
    }
}
