use rdelta::{MagicNumber, compute_delta, read_signature, signature};
use std::fs::{self, File};
use std::io::BufWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let old_path = "old_file.txt";
    let new_path = "new_file.txt";
    let sig_path = "old_file.sig";
    let delta_path = "new_file.delta";

    let _ = fs::remove_file(old_path);
    let _ = fs::remove_file(new_path);
    let _ = fs::remove_file(sig_path);
    let _ = fs::remove_file(delta_path);

    println!("Creating test files...");
    fs::write(
        old_path,
        b"This is a large-ish file.\nIt has multiple lines.\nSome stay the same.\n",
    )?;
    fs::write(
        new_path,
        b"This is a large-ish file.\nIt has CHANGED lines.\nSome stay the same.\nAnd new lines added.\n",
    )?;

    println!("Old file size: {} bytes", fs::metadata(old_path)?.len());
    println!("New file size: {} bytes", fs::metadata(new_path)?.len());

    println!("Generating signature of {old_path}");
    let old_file = File::open(old_path)?;
    let sig_file = BufWriter::new(File::create(sig_path)?);
    let sig = signature(old_file, sig_file, 1024, 16, MagicNumber::Md4)?;
    println!(
        "Signature covers {} block(s) of up to 1024 bytes each",
        sig.block_count()
    );

    // A receiver who only has the signature file reads it back the same way a sender
    // that built it in-process already has it in memory.
    let reloaded = read_signature(File::open(sig_path)?)?;
    assert_eq!(reloaded.block_count(), sig.block_count());

    println!("Calculating delta for {new_path}");
    let new_file = File::open(new_path)?;
    let delta_file = BufWriter::new(File::create(delta_path)?);
    compute_delta(&sig, new_file, delta_file)?;

    println!(
        "Delta written to {delta_path} ({} bytes)",
        fs::metadata(delta_path)?.len()
    );

    fs::remove_file(old_path)?;
    fs::remove_file(new_path)?;
    fs::remove_file(sig_path)?;
    fs::remove_file(delta_path)?;

    Ok(())
}
