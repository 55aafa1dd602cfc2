use autowire_common::Component;
use component_macros::{autowired, component};

#[component(name = "engine", constructor)]
#[derive(Debug)]
struct Engine {
    cylinders: u8,
}

#[autowired]
impl Engine {
    pub fn new() -> Self {
        Self { cylinders: 4 }
    }
}

fn main() {
    let engine = Engine::new();
    assert_eq!(engine.name(), "engine");
    assert_eq!(engine.cylinders, 4);
}
