pub(crate) mod edit;
pub(crate) mod inspect;
pub(crate) mod size;
