// Copyright @yucwang 2026

pub mod hammersley;
pub mod random;
pub mod stratified;
