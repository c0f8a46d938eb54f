/// Efficient bitset over declared tile types
pub mod bitset;
/// Candidate evaluation from resolved neighbor constraints
pub mod candidates;
/// Weighted collapse of a single cell
pub mod collapse;
/// Generation state machine and restart policy
pub mod controller;
/// Seeded random selection primitives
pub mod sampler;
