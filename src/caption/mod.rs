pub(crate) mod compose;
