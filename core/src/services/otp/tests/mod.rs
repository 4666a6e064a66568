pub(crate) mod mocks;
