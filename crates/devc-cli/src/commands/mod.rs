mod fold;

pub use fold::fold;
