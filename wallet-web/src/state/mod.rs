pub mod wallet;

pub use wallet::{CommandReport, JsObserver};
