// Texture lookup for the stage
//
// The stage does not decode image data; it hands out opaque handles that
// the render backend resolves. Game code refers to textures by name once
// at startup and holds handles afterwards.

use std::collections::HashMap;

/// Opaque handle to a registered texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

/// Registry mapping texture names to handles
#[derive(Debug, Default)]
pub struct TextureLibrary {
    by_name: HashMap<String, TextureHandle>,
    names: Vec<String>,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture name, returning its handle.
    /// Registering the same name twice returns the existing handle.
    pub fn register(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        let handle = TextureHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    /// Look up a texture by name
    pub fn lookup(&self, name: &str) -> Option<TextureHandle> {
        self.by_name.get(name).copied()
    }

    /// Get the name a handle was registered under
    pub fn name_of(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(|s| s.as_str())
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut library = TextureLibrary::new();
        let handle = library.register("mario_standing.png");

        assert_eq!(library.lookup("mario_standing.png"), Some(handle));
        assert_eq!(library.name_of(handle), Some("mario_standing.png"));
    }

    #[test]
    fn test_register_twice_returns_same_handle() {
        let mut library = TextureLibrary::new();
        let first = library.register("brick.png");
        let second = library.register("brick.png");

        assert_eq!(first, second);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let library = TextureLibrary::new();
        assert_eq!(library.lookup("missing.png"), None);
    }
}
