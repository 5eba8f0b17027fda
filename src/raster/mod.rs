pub(crate) mod blend;
pub(crate) mod scanline;
pub(crate) mod surface;
