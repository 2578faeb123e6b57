//! Per-feature accessors.
//!
//! Every feature has an explicit getter and setter. Getters read the chip,
//! so for shadowed registers they report the applied value, not a pending
//! one. Setters validate their argument against the range the datasheet
//! documents and fail with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
//! instead of touching the bus.

mod adc;
mod dcc;
mod fast_detect;
mod jesd204b;
mod macros;
