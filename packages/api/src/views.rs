//! HTML views. Templates are compiled into the binary and rendered with
//! minijinja; `.html` templates are auto-escaped.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AppError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("fruits/index.html", include_str!("../templates/fruits/index.html")),
    ("fruits/new.html", include_str!("../templates/fruits/new.html")),
    ("fruits/edit.html", include_str!("../templates/fruits/edit.html")),
    ("fruits/show.html", include_str!("../templates/fruits/show.html")),
    ("users/login.html", include_str!("../templates/users/login.html")),
    ("users/signup.html", include_str!("../templates/users/signup.html")),
];

#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let html = self.env.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use store::FruitId;

    #[test]
    fn test_all_templates_render() {
        let views = Views::new().unwrap();
        let fruit = store::Fruit {
            id: FruitId::new(),
            name: "Kiwi".to_string(),
            color: "green".to_string(),
            ready_to_eat: true,
            owner: "alice".to_string(),
        };
        for &(name, _) in TEMPLATES {
            let Html(page) = views
                .render(name, context! { fruit => fruit.clone(), fruits => vec![fruit.clone()] })
                .unwrap();
            assert!(!page.is_empty(), "{name}");
        }
    }

    #[test]
    fn test_escapes_html() {
        let views = Views::new().unwrap();
        let fruit = store::Fruit {
            id: FruitId::new(),
            name: "<script>".to_string(),
            color: "red".to_string(),
            ready_to_eat: false,
            owner: "alice".to_string(),
        };
        let Html(page) = views
            .render("fruits/show.html", context! { fruit => fruit })
            .unwrap();
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
