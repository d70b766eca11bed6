// Domain layer: the vehicle entity and its value objects. Never logs; every
// rule violation is returned to the caller.

pub mod plate;
pub mod vehicle;
