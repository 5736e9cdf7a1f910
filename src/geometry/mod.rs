pub mod bezier;
pub mod scanline;
