use anyhow::Result;

use bannerloop_core::PaddedSequence;

pub fn run(items: &[String]) -> Result<()> {
    let padded = PaddedSequence::build(items)?;

    println!(
        "Padded sequence ({} real items, {} slots):\n",
        padded.real_len(),
        padded.len()
    );

    for (slot, item) in padded.slots().iter().enumerate() {
        let real = padded.real_index_of(slot)?;
        let marker = if padded.is_sentinel(slot) {
            " (sentinel)"
        } else {
            ""
        };
        println!("  {:>3}  {:<16} real {}{}", slot, item, real, marker);
    }

    Ok(())
}
