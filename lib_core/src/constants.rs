pub const HOME: &str = "HOME";
