#[cfg(test)]
mod share_tests {
    use proptest::prelude::*;

    use lz4_session::{
        share::{decode, decode_url, encode, encode_with_limit, share_url, token_from_url, try_decode, DecodedShare, ShareError},
        types::{Mode, SessionFields},
    };

    fn sample_fields() -> SessionFields {
        SessionFields::new(b"hello world".to_vec(), Mode::Compress, "0.3.4")
            .with_file_name("greeting.txt.lz4")
            .with_output(vec![1u8, 2, 3, 255])
            .with_timestamp(1_700_000_000_000)
    }

    #[test]
    fn small_payload_roundtrips() {
        let fields = sample_fields();
        let token = encode(&fields);
        assert!(!token.truncated);

        let decoded = decode(&token.token);
        assert!(!decoded.payload_omitted);
        assert_eq!(decoded.fields, fields);
    }

    #[test]
    fn token_is_query_safe() {
        let token = encode(&sample_fields());
        assert!(token
            .token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.~%".contains(c)));
    }

    #[test]
    fn large_payload_keeps_configuration_only() {
        // 1600 bytes → 2136 base64 chars.
        let fields = SessionFields::new(vec![b'a'; 1600], Mode::Decompress, "0.3.3")
            .with_file_name("big.lz4")
            .with_output(vec![0u8; 10])
            .with_timestamp(42);
        let token = encode(&fields);
        assert!(token.truncated);

        let decoded = decode(&token.token);
        assert!(decoded.payload_omitted);
        assert!(decoded.fields.input.is_empty());
        assert_eq!(decoded.fields.output, None);
        assert_eq!(decoded.fields.mode, Mode::Decompress);
        assert_eq!(decoded.fields.codec_version, "0.3.3");
        assert_eq!(decoded.fields.file_name.as_deref(), Some("big.lz4"));
        assert_eq!(decoded.fields.timestamp, Some(42));
    }

    #[test]
    fn threshold_is_exclusive() {
        // 1500 bytes → exactly 2000 base64 chars.
        let fields = SessionFields::new(vec![7u8; 1500], Mode::Compress, "0.3.4");
        assert!(!encode(&fields).truncated);
        assert!(encode_with_limit(&fields, 1999).truncated);
    }

    #[test]
    fn empty_input_is_still_a_payload() {
        let fields = SessionFields::new(Vec::new(), Mode::Compress, "0.3.4");
        let decoded = decode(&encode(&fields).token);
        assert!(!decoded.payload_omitted);
        assert!(decoded.fields.input.is_empty());
    }

    #[test]
    fn malformed_tokens_decode_to_invalid() {
        for token in ["", "not%20json", "%7B%22d%22%3A%22!!!%22%7D", "%5B1%2C2%5D"] {
            assert_eq!(decode(token), DecodedShare::invalid(), "token {token:?}");
        }
        assert!(matches!(try_decode("not%20json"), Err(ShareError::Malformed(_))));
    }

    #[test]
    fn legacy_tokens_decode_filename_twice() {
        let json = r#"{"d":"aGVsbG8=","m":"c","v":"0.3.4","f":"my%20file.txt","t":1700000000000}"#;
        let token = urlencoding::encode(json).into_owned();

        let decoded = decode(&token);
        assert!(!decoded.payload_omitted);
        assert_eq!(decoded.fields.input, b"hello");
        assert_eq!(decoded.fields.mode, Mode::Compress);
        assert_eq!(decoded.fields.file_name.as_deref(), Some("my file.txt"));
        assert_eq!(decoded.fields.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn legacy_compressed_payloads_are_unwrapped() {
        let packed = [4u8, 0, 0, 0, 0x40, b'a', b'b', b'c', b'd'];
        let packed_b64 = lz4_session::utils::encode_base64(&packed);
        let twice = lz4_session::utils::encode_base64(packed_b64.as_bytes());

        // Compress mode: output shown as base64 text.
        let json = format!(r#"{{"d":"YWJjZA==","m":"c","v":"0.3.4","o":"{twice}"}}"#);
        let decoded = decode(&urlencoding::encode(&json));
        assert_eq!(decoded.fields.input, b"abcd");
        assert_eq!(decoded.fields.output.as_deref(), Some(&packed[..]));

        // Decompress mode: input pasted as base64 text.
        let json = format!(r#"{{"d":"{twice}","m":"d","v":"0.3.4","o":"YWJjZA=="}}"#);
        let decoded = decode(&urlencoding::encode(&json));
        assert_eq!(decoded.fields.input, packed);
        assert_eq!(decoded.fields.output.as_deref(), Some(&b"abcd"[..]));

        // Display text that is not base64 stays as text.
        let json = r#"{"d":"aGVsbG8gd29ybGQ=","m":"d","v":"0.3.4"}"#;
        assert_eq!(decode(&urlencoding::encode(json)).fields.input, b"hello world");
    }

    #[test]
    fn current_schema_keeps_percent_signs_in_names() {
        let fields = SessionFields::new(b"x".to_vec(), Mode::Compress, "0.3.4").with_file_name("100%.txt");
        let decoded = decode(&encode(&fields).token);
        assert_eq!(decoded.fields.file_name.as_deref(), Some("100%.txt"));
    }

    #[test]
    fn missing_mode_reads_as_decompress() {
        let token = urlencoding::encode(r#"{"s":1,"d":""}"#).into_owned();
        let decoded = decode(&token);
        assert_eq!(decoded.fields.mode, Mode::Decompress);
        assert_eq!(decoded.fields.timestamp, None);
        assert_eq!(decoded.fields.codec_version, "");
    }

    #[test]
    fn zero_timestamp_is_absent() {
        let fields = SessionFields::new(b"x".to_vec(), Mode::Compress, "0.3.4").with_timestamp(0);
        assert_eq!(decode(&encode(&fields).token).fields.timestamp, None);
    }

    #[test]
    fn share_url_roundtrip() {
        let fields = sample_fields();
        let token = encode(&fields);
        let url = share_url("https://example.com/play?x=1#frag", &token).unwrap();
        assert!(url.starts_with("https://example.com/play?state="));
        assert!(!url.contains('#'));
        assert!(!url.contains("x=1"));

        assert_eq!(token_from_url(&url).unwrap(), Some(token.token.clone()));
        let decoded = decode_url(&url).unwrap();
        assert_eq!(decoded.fields, fields);
    }

    #[test]
    fn urls_without_state() {
        assert_eq!(token_from_url("https://example.com/play?x=1").unwrap(), None);
        assert_eq!(token_from_url("https://example.com/play?state=").unwrap(), None);
        assert!(decode_url("https://example.com/").is_none());
        assert!(matches!(token_from_url("not a url"), Err(ShareError::InvalidUrl(_))));
        assert!(share_url("::", &encode(&sample_fields())).is_err());
    }

    proptest! {
        #[test]
        fn any_small_payload_roundtrips(
            input in proptest::collection::vec(any::<u8>(), 0..512),
            output in proptest::collection::vec(any::<u8>(), 0..512),
            name in "[a-zA-Z0-9 %._-]{1,24}",
            compress in any::<bool>(),
            timestamp in 1i64..4_000_000_000_000,
        ) {
            let mode = if compress { Mode::Compress } else { Mode::Decompress };
            let fields = SessionFields::new(input, mode, "0.3.4")
                .with_file_name(name)
                .with_output(output)
                .with_timestamp(timestamp);
            let decoded = decode(&encode(&fields).token);
            prop_assert!(!decoded.payload_omitted);
            prop_assert_eq!(decoded.fields, fields);
        }
    }
}
