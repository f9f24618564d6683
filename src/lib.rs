// Copyright @yucwang 2021

pub mod brdfs;
pub mod core;
pub mod emitters;
pub mod integrators;
pub mod io;
pub mod math;
pub mod renderers;
pub mod samplers;
pub mod sensors;
pub mod shapes;
