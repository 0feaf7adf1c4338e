pub mod individual;
pub mod nsga2;
pub mod operators;
pub mod pareto;
pub mod space;

pub use individual::Individual;
pub use nsga2::Nsga2;
pub use operators::{ConstraintRepair, NoRepair};
pub use space::{ParamDescriptor, ParamKind, ParamValue, ParameterMap, ParameterSpace};
