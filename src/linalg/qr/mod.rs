//! Low level implementation of the Householder QR decomposition.

pub mod no_pivoting;
