//! Parallel-or-sequential mapping for independent runs
//!
//! The `cfg` switch lives here only. With the `parallel` feature, rayon's
//! indexed parallel iterator keeps results in input order, so a batch
//! produces the same report either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map `f` over `slice`, in parallel unless `force_sequential` is set
pub fn map_slice<T, F, R>(slice: &[T], f: F, force_sequential: bool) -> Vec<R>
where
    T: Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            slice.iter().map(f).collect()
        } else {
            slice.par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        slice.iter().map(f).collect()
    }
}
