// Copyright 2020 @TwoCookingMice

pub mod bitmap;
pub mod color;
pub mod constants;
pub mod quadratic;
pub mod ray;
pub mod rect;
pub mod transform;
