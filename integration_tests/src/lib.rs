#![no_std]

mod tests;
mod testutils;
