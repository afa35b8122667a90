#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10
    {
        let compression_level = data[0];
        let data = &data[1..];
        let orig_len = data.len();
        let compressed = miniz_oxide::deflate::compress_to_vec(data, compression_level);

        let options = deflate_core::InflateOptions::default().with_size_limit(orig_len);
        let decoded = deflate_core::inflate_with_options(&compressed, options)
            .expect("failed to decompress data produced by a known-good compressor");

        assert!(
            data == decoded,
            "decompressed data doesn't match the original data"
        );
    }
});
