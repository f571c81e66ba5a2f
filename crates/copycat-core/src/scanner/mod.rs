pub mod walk;

pub use walk::load_corpus;
