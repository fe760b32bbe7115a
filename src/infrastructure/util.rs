use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Transliterating slugifier: `¿Qué pasó?` becomes `que-paso`.
#[derive(Default, Clone, Copy)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}
