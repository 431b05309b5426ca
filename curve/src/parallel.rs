//! Range partitioning over the rayon thread pool.

/// Upper bound on the number of tasks a caller may request.
const MAX_TASKS: usize = 512;

/// Splits `0..n` into contiguous ranges, one per task, and runs `work` on
/// each of them. Returns once every range has been processed.
pub fn execute<F>(n: usize, work: F)
where
    F: Fn(usize, usize) + Sync,
{
    execute_with(n, rayon::current_num_threads(), work)
}

/// Same as [`execute`] with an explicit task count, clamped to `1..=512`.
pub fn execute_with<F>(n: usize, max_tasks: usize, work: F)
where
    F: Fn(usize, usize) + Sync,
{
    let ranges = partition(n, max_tasks);
    tracing::trace!(iterations = n, tasks = ranges.len(), "parallel execute");

    if ranges.len() <= 1 {
        work(0, n);
        return;
    }

    let work = &work;
    rayon::scope(|s| {
        for (start, end) in ranges {
            s.spawn(move |_| work(start, end));
        }
    });
}

/// Like [`execute`], but each task also receives its own disjoint slice
/// `out[start..end]` to write results into.
pub fn execute_mut<T, F>(out: &mut [T], work: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    execute_mut_with(out, rayon::current_num_threads(), work)
}

/// Same as [`execute_mut`] with an explicit task count, clamped to `1..=512`.
pub fn execute_mut_with<T, F>(out: &mut [T], max_tasks: usize, work: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    let ranges = partition(out.len(), max_tasks);
    tracing::trace!(iterations = out.len(), tasks = ranges.len(), "parallel execute");

    if ranges.len() <= 1 {
        work(0, out);
        return;
    }

    let work = &work;
    rayon::scope(|s| {
        let mut rest = out;
        for (start, end) in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(end - start);
            rest = tail;
            s.spawn(move |_| work(start, chunk));
        }
    });
}

/// Contiguous ranges covering `0..n`. The first `n % tasks` ranges get one
/// extra iteration.
pub(crate) fn partition(n: usize, max_tasks: usize) -> Vec<(usize, usize)> {
    let mut tasks = max_tasks.clamp(1, MAX_TASKS);
    if tasks == 1 {
        return vec![(0, n)];
    }

    let mut per_task = n / tasks;
    // more tasks than iterations: one iteration each
    if per_task < 1 {
        per_task = 1;
        tasks = n;
    }

    let mut extra = n - tasks * per_task;
    let mut offset = 0;
    let mut ranges = Vec::with_capacity(tasks);
    for i in 0..tasks {
        let start = i * per_task + offset;
        let mut end = start + per_task;
        if extra > 0 {
            end += 1;
            extra -= 1;
            offset += 1;
        }
        ranges.push((start, end));
    }
    ranges
}
