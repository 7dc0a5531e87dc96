//! Six-stage bit/byte transformation pipeline.
//!
//! Tokens of arbitrary bit-width enter at [`Pipeline::write`], are regrouped
//! into input aggregates, exploded into single bits, re-packed into output
//! aggregates, split into byte-wide chunks and finally rendered by the sink
//! stage:
//!
//! | Stage | Role |
//! |-------|------|
//! | [`InStream`] | groups `width_in`-bit tokens into input aggregates |
//! | [`InAggregateStream`] | explodes aggregates into single bits |
//! | [`BitStream`] | packs bits into output aggregates |
//! | [`OutAggregateStream`] | splits aggregates into fixed-width chunks |
//! | [`OutStream`] | byte-granular relay |
//! | [`ControlledOutputStream`] | discard/hex policy over the sink |
//!
//! Every stage reports each accepted value to the observer [`Context`],
//! which feeds bound calculators and callback expressions ([`Variable`]).
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod bit_stream;
mod context;
mod in_aggregate;
mod in_stream;
mod out_aggregate;
mod out_stream;
mod output;
mod pipeline;
mod variable;

pub use bit_stream::BitStream;
pub use context::{Context, Counters, EvalScope, Evaluator};
pub use in_aggregate::InAggregateStream;
pub use in_stream::InStream;
pub use out_aggregate::OutAggregateStream;
pub use out_stream::OutStream;
pub use output::ControlledOutputStream;
pub use pipeline::Pipeline;
pub use variable::{check_name, Variable};
// Re-export the contracts for convenience
pub use traits::{Endianness, Stage, Stream, Trigger};
