// Copyright @yucwang 2026

pub mod ray_cast;
pub mod ray_trace;
