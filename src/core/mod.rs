// Copyright @yucwang 2021

pub mod bsdf;
pub mod emitter;
pub mod error;
pub mod hierarchy;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod sampler;
pub mod scene;
pub mod scene_loader;
pub mod shape;
