pub mod provider;
pub mod timer;

pub use provider::BrowserProvider;
pub use timer::GlooTimer;
