// Interface adapters: terminal surface, key decoding and result reporting.

pub mod canvas;
pub mod keys;
pub mod report;
pub mod terminal;
