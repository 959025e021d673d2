//! Infrastructure implementations for Confirmer

mod interactive;

pub use interactive::InteractiveConfirmer;
