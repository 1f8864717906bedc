// Domain layer: records, render outcomes, the node tree and the ports the engine talks through.

pub mod model;
pub mod node;
pub mod ports;
