use rdelta::{MagicNumber, compute_delta, signature};
use std::io::Cursor;

fn main() {
    let original = b"Hello, world! This is the original content of the file.";
    let modified = b"Hello, Rust! This is the modified content of the file.";

    println!("Original: {:?}", String::from_utf8_lossy(original));
    println!("Modified: {:?}", String::from_utf8_lossy(modified));

    let mut sig_wire = Vec::new();
    let sig = signature(Cursor::new(original), &mut sig_wire, 16, 16, MagicNumber::Md4)
        .expect("signature generation");
    println!(
        "\nGenerated a signature over {} block(s)",
        sig.block_count()
    );

    let mut delta_wire = Vec::new();
    compute_delta(&sig, Cursor::new(modified), &mut delta_wire).expect("delta generation");
    println!(
        "Delta is {} bytes (original was {} bytes)",
        delta_wire.len(),
        original.len()
    );
}
