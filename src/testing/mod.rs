mod fake_make;

pub use fake_make::FakeMakeRunner;
