use crossbeam_channel::unbounded;
use tracing::debug;

use crate::accessor::AccessorFactory;
use crate::error::GsaError;

/// Items are cut into contiguous slices of `ceil(n / threads)`. Every worker's
/// accessor is opened before anything is spawned. Results are returned in
/// input order.
pub fn run_pool<F, T, R, W>(
    factory: &F,
    items: &[T],
    threads: usize,
    work: W,
) -> Result<Vec<R>, GsaError>
where
    F: AccessorFactory,
    T: Sync,
    R: Send,
    W: Fn(&F::Accessor, &T) -> R + Sync,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let slice_len = items.len().div_ceil(threads.max(1));
    let slices: Vec<&[T]> = items.chunks(slice_len).collect();
    let accessors = slices
        .iter()
        .map(|_| factory.open())
        .collect::<Result<Vec<_>, _>>()?;
    debug!(workers = slices.len(), slice_len, "starting worker pool");

    let (sender, receiver) = unbounded();
    let work = &work;
    std::thread::scope(|scope| {
        for (worker, (slice, accessor)) in slices.into_iter().zip(accessors).enumerate() {
            let sender = sender.clone();
            let offset = worker * slice_len;
            scope.spawn(move || {
                for (position, item) in slice.iter().enumerate() {
                    let result = work(&accessor, item);
                    // The receiver outlives the scope, so sending cannot fail.
                    let _ = sender.send((offset + position, result));
                }
            });
        }
    });
    drop(sender);

    let mut results: Vec<(usize, R)> = receiver.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, result)| result).collect())
}
