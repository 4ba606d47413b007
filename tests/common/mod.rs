//! Shared integration-test scaffolding: a test-only delta decoder that reconstructs a
//! target buffer from a base and a delta wire stream produced by [`rdelta::compute_delta`],
//! plus a `log`/`env_logger` init helper. Patch application is explicitly out of scope
//! for the crate itself; the decoder exists purely so integration tests can assert
//! round-trip correctness (spec property: "coverage").

use rdelta::MagicNumber;
use std::io::{Cursor, Read};

const OP_END: u8 = 0;
const OP_LIT_BASE: u8 = 65;
const OP_COPY_BASE: u8 = 69;
const WIDTHS: [u8; 4] = [1, 2, 4, 8];

/// Turns on `log` output for the duration of the test binary, so the `trace!`/`debug!`
/// lines in `compute_delta`/`signature` show up under `RUST_LOG=trace cargo test -- --nocapture`.
/// Safe to call from every test: `try_init` no-ops after the first call.
#[allow(dead_code)]
pub fn init() {
    let _ = env_logger::builder()
        .format_timestamp(None)
        .is_test(true)
        .try_init();
}

#[allow(dead_code)]
pub fn apply(base: &[u8], delta_wire: &[u8]) -> Vec<u8> {
    let mut cursor = Cursor::new(delta_wire);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic).expect("delta header");
    assert_eq!(u32::from_be_bytes(magic), MagicNumber::DELTA, "bad delta magic");

    let mut out = Vec::new();
    loop {
        let mut opcode = [0u8; 1];
        cursor.read_exact(&mut opcode).expect("opcode byte");
        let opcode = opcode[0];
        if opcode == OP_END {
            break;
        }

        if (OP_LIT_BASE..OP_COPY_BASE).contains(&opcode) {
            let width = WIDTHS[(opcode - OP_LIT_BASE) as usize];
            let len = read_be(&mut cursor, width);
            let mut buf = vec![0u8; len as usize];
            cursor.read_exact(&mut buf).expect("literal bytes");
            out.extend_from_slice(&buf);
        } else {
            let rel = opcode - OP_COPY_BASE;
            let pos_width = WIDTHS[(rel / 4) as usize];
            let len_width = WIDTHS[(rel % 4) as usize];
            let pos = read_be(&mut cursor, pos_width) as usize;
            let len = read_be(&mut cursor, len_width) as usize;
            out.extend_from_slice(&base[pos..pos + len]);
        }
    }
    out
}

fn read_be(cursor: &mut Cursor<&[u8]>, width: u8) -> u64 {
    let mut buf = [0u8; 8];
    cursor
        .read_exact(&mut buf[8 - width as usize..])
        .expect("framed integer");
    u64::from_be_bytes(buf)
}

/// Decoded instruction shape, for tests that want to assert on structure rather than
/// just reconstructed bytes.
#[derive(Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Op {
    Literal(Vec<u8>),
    Copy { pos: u64, len: u64 },
}

#[allow(dead_code)]
pub fn decode_ops(delta_wire: &[u8]) -> Vec<Op> {
    let mut cursor = Cursor::new(delta_wire);
    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic).expect("delta header");

    let mut ops = Vec::new();
    loop {
        let mut opcode = [0u8; 1];
        cursor.read_exact(&mut opcode).expect("opcode byte");
        let opcode = opcode[0];
        if opcode == OP_END {
            break;
        }
        if (OP_LIT_BASE..OP_COPY_BASE).contains(&opcode) {
            let width = WIDTHS[(opcode - OP_LIT_BASE) as usize];
            let len = read_be(&mut cursor, width);
            let mut buf = vec![0u8; len as usize];
            cursor.read_exact(&mut buf).expect("literal bytes");
            ops.push(Op::Literal(buf));
        } else {
            let rel = opcode - OP_COPY_BASE;
            let pos_width = WIDTHS[(rel / 4) as usize];
            let len_width = WIDTHS[(rel % 4) as usize];
            let pos = read_be(&mut cursor, pos_width);
            let len = read_be(&mut cursor, len_width);
            ops.push(Op::Copy { pos, len });
        }
    }
    ops
}

#[allow(dead_code)]
pub fn round_trip(
    a: &[u8],
    b: &[u8],
    block_len: u32,
    strong_len: u32,
    sig_type: MagicNumber,
) -> Vec<u8> {
    init();
    let mut sig_wire = Vec::new();
    let sig = rdelta::signature(Cursor::new(a), &mut sig_wire, block_len, strong_len, sig_type)
        .unwrap();
    let mut delta_wire = Vec::new();
    rdelta::compute_delta(&sig, Cursor::new(b), &mut delta_wire).unwrap();
    apply(a, &delta_wire)
}
