// masonry_sim — pure Rust bricklaying simulation library.
//
// This crate contains all simulation logic for the masonry build-order
// optimizer: the wall grid, bond pattern generation, stride assignment,
// build-order sequencing, and the time/energy cost model. It has zero
// terminal dependencies and can be tested, benchmarked, and run headless.
//
// Module overview:
// - `sim.rs`:      Top-level BuildSim — owns the wall, config, and PRNG.
// - `wall.rs`:     The wall grid (courses of brick cells, the spatial truth).
// - `bond.rs`:     Bond pattern generation (stretcher, Flemish, wild).
// - `stride.rs`:   Stride assignment — partitions the wall into robot-reachable blocks.
// - `plan.rs`:     Build-order sequencing over the assigned strides.
// - `estimate.rs`: Time/energy cost model and stride metrics.
// - `config.rs`:   RobotConfig + WallSpec — all tunable parameters.
// - `prng.rs`:     SplitMix64 PRNG for wild bond generation.
// - `error.rs`:    SimError — configuration errors vs. invariant violations.
// - `types.rs`:    Brick kinds, stride identifiers, strategy/bond selectors.
//
// The companion crate `masonry_cli` wraps this library for the terminal:
// ANSI rendering, interactive stepping, and the efficiency report. That
// boundary is enforced at the compiler level — this crate cannot depend on
// rendering, wall-clock pacing, or user input.
//
// **Critical constraint: determinism.** The simulation is a pure function of
// `(WallSpec, RobotConfig)`. All randomness comes from a seeded SplitMix64
// PRNG. No system time, no OS entropy. Use `BTreeMap` for ordered
// collections.

pub mod bond;
pub mod config;
pub mod error;
pub mod estimate;
pub mod plan;
pub mod prng;
pub mod sim;
pub mod stride;
pub mod types;
pub mod wall;
