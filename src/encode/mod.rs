pub(crate) mod crc;
pub(crate) mod png;
