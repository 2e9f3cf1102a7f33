#[cfg(target_arch = "wasm32")]
pub fn main() {
    users_crud::start();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
