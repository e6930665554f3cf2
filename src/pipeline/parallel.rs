use crate::loaders::LoadMode;
use crate::pipeline::reader::{FileOutcome, load_file};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Load files with one reader per file, at most `jobs` at a time, returning outcomes in input order.
pub fn load_files_parallel(files: &[PathBuf], mode: LoadMode, jobs: usize) -> Vec<FileOutcome> {
    process_parallel_with(files.to_vec(), jobs, |path| load_file(&path, mode))
}

fn process_parallel_with<T, R, F>(items: Vec<T>, jobs: usize, process: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let worker_count = jobs.max(1);
    let mut ordered = Vec::with_capacity(items.len());
    let mut indexed = items.into_iter().enumerate();

    loop {
        let batch: Vec<(usize, T)> = indexed.by_ref().take(worker_count).collect();
        if batch.is_empty() {
            break;
        }

        if worker_count == 1 {
            for (_index, item) in batch {
                ordered.push(process(item));
            }
            continue;
        }

        let (result_tx, result_rx) = mpsc::channel::<(usize, R)>();
        thread::scope(|scope| {
            for (index, item) in batch {
                let result_tx = result_tx.clone();
                let process = &process;
                scope.spawn(move || {
                    let processed = process(item);
                    let _ = result_tx.send((index, processed));
                });
            }
        });
        drop(result_tx);

        let mut pending = BTreeMap::new();
        for (index, result) in result_rx {
            pending.insert(index, result);
        }
        ordered.extend(pending.into_values());
    }

    ordered
}
