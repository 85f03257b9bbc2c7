//! tests/chain_tests.rs
//! Driving a session by hand through the public API

mod common;
use common::{decrypt_with_test_keys, sample_plaintext, test_chain, RecordingSink};

use cbc_hmac_stream::{BlockCipherChain, ChainState, CodecError};

#[test]
fn manual_session_round_trips() {
    let data = sample_plaintext(16 * 5 + 9);
    let mut chain = test_chain();
    let mut sink = RecordingSink::default();

    assert_eq!(chain.state(), ChainState::Unstarted);
    chain.emit_iv(&mut sink).unwrap();
    assert_eq!(chain.state(), ChainState::Active);

    chain.encrypt_aligned(&mut sink, &data[..32]).unwrap();
    chain.encrypt_aligned(&mut sink, &data[32..48]).unwrap();
    chain.encrypt_aligned(&mut sink, &data[48..80]).unwrap();
    chain.finish(&mut sink, &data[80..]).unwrap();
    assert_eq!(chain.state(), ChainState::Finished);

    assert_eq!(chain.bytes_emitted(), sink.data.len() as u64);
    assert_eq!(decrypt_with_test_keys(&sink.data).unwrap(), data);
}

#[test]
fn split_points_do_not_matter() {
    let data = sample_plaintext(16 * 8 + 3);
    let aligned = 16 * 8;

    let mut reference = Vec::new();
    let mut chain = test_chain();
    chain.emit_iv(&mut reference).unwrap();
    chain.finish(&mut reference, &data).unwrap();

    for split in (0..=aligned).step_by(16) {
        let mut out = Vec::new();
        let mut chain = test_chain();
        chain.emit_iv(&mut out).unwrap();
        chain.encrypt_aligned(&mut out, &data[..split]).unwrap();
        chain
            .encrypt_aligned(&mut out, &data[split..aligned])
            .unwrap();
        chain.finish(&mut out, &data[aligned..]).unwrap();
        assert_eq!(out, reference, "split at {split}");
    }
}

#[test]
fn finish_with_aligned_tail_adds_full_padding_block() {
    let mut chain = test_chain();
    let mut out = Vec::new();
    chain.emit_iv(&mut out).unwrap();
    chain.finish(&mut out, &[0u8; 32]).unwrap();

    assert_eq!(out.len(), 16 + 48 + 32);
    assert_eq!(decrypt_with_test_keys(&out).unwrap(), vec![0u8; 32]);
}

#[test]
fn session_is_single_use() {
    let mut chain = test_chain();
    let mut out = Vec::new();
    chain.emit_iv(&mut out).unwrap();
    chain.finish(&mut out, b"once").unwrap();

    let err = chain.finish(&mut out, b"twice").unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidState {
            op: "finish",
            state: ChainState::Finished
        }
    ));
    assert!(err.to_string().contains("finish"));
}

#[test]
fn failed_write_spends_session() {
    let mut chain = test_chain();
    let mut sink = RecordingSink::failing_after(20);
    chain.emit_iv(&mut sink).unwrap();

    assert!(matches!(
        chain.encrypt_aligned(&mut sink, &[0u8; 16]),
        Err(CodecError::Io(_))
    ));
    assert_eq!(chain.state(), ChainState::Failed);

    sink.fail_after = None;
    assert!(matches!(
        chain.finish(&mut sink, &[]),
        Err(CodecError::InvalidState {
            state: ChainState::Failed,
            ..
        })
    ));
}

#[test]
fn constructor_validates_lengths() {
    let err = BlockCipherChain::new(&[0u8; 12], &[0u8; 32], &[0u8; 32])
        .err()
        .unwrap();
    assert!(matches!(err, CodecError::InvalidParameter(ref m) if m.contains("IV")));

    let err = BlockCipherChain::new(&[0u8; 16], &[0u8; 16], &[0u8; 32])
        .err()
        .unwrap();
    assert!(matches!(err, CodecError::InvalidParameter(ref m) if m.contains("MAC key")));

    let err = BlockCipherChain::new(&[0u8; 16], &[0u8; 32], &[0u8; 24])
        .err()
        .unwrap();
    assert!(matches!(err, CodecError::InvalidParameter(ref m) if m.contains("cipher key")));
}
