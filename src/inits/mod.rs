pub(crate) mod firstk;
pub(crate) mod randomsample;
pub(crate) mod kmeanplusplus;
pub(crate) mod precomputed;
