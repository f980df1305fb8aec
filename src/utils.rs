use rand::Rng;

use crate::transaction::Transaction;

/// Merges two per-side streams into one arbitrary interleaving. Order inside
/// each stream is kept.
pub fn interleave<R: Rng + ?Sized>(
    writes: &[Transaction],
    reads: &[Transaction],
    rng: &mut R,
) -> Vec<Transaction> {
    let mut out = Vec::with_capacity(writes.len() + reads.len());
    let (mut w, mut r) = (0, 0);
    while w < writes.len() || r < reads.len() {
        let take_write = match (w < writes.len(), r < reads.len()) {
            (true, true) => rng.gen_bool(0.5),
            (true, false) => true,
            _ => false,
        };
        match take_write {
            true => {
                out.push(writes[w].clone());
                w += 1;
            }
            false => {
                out.push(reads[r].clone());
                r += 1;
            }
        }
    }
    out
}
