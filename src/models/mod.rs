pub mod chemistry;
pub mod crop;
pub mod facility;
pub mod market;
pub mod projection;

pub use chemistry::*;
pub use crop::*;
pub use facility::*;
pub use market::*;
pub use projection::*;
