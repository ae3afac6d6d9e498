//! Remap pipelines - the daemon's event loop

mod run;

pub use run::run_remap_loop;
