//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in heft-core for the scale's hardware components:
//!
//! - Load cell ADC (HX711)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
