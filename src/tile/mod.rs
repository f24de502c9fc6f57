pub(crate) mod preprocess;
