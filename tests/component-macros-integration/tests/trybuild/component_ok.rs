use autowire_common::Component; // trait brought into scope to call generated methods
use component_macros::component;

#[component(name = "ok_service")]
#[derive(Debug, Default)]
struct OkService;

fn main() {
    // Ensure the macro generated impl provides the name method without manual impl conflicts
    let s = OkService;
    assert_eq!(s.name(), "ok_service");
}
