//! Built-in HTML renderer
//!
//! Plain string building, no template engine. Every dynamic value goes
//! through [`escape`].

use crate::error::AppResult;
use crate::models::Book;

use super::{View, ViewContext, ViewRenderer};

#[derive(Default, Clone)]
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: View, ctx: &ViewContext) -> AppResult<String> {
        let body = match view {
            View::Home => home(ctx),
            View::Login => login(ctx),
            View::Profile => profile(ctx),
            View::Error => error(ctx),
            View::Logout => logout(),
        };
        Ok(layout(view.as_str(), ctx, &body))
    }
}

/// Escape text for safe interpolation into HTML
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, ctx: &ViewContext, body: &str) -> String {
    let nav = if ctx.is_logged_in {
        format!(
            "<nav>Signed in as {} \
             | <a href=\"/\">Catalog</a> \
             | <a href=\"/profile\">My books</a> \
             | <form method=\"post\" action=\"/logout\" class=\"inline\"><button>Log out</button></form></nav>",
            escape(ctx.username.as_deref().unwrap_or("card holder")),
        )
    } else {
        "<nav><a href=\"/\">Catalog</a> | <a href=\"/login\">Log in</a></nav>".to_string()
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Biblio - {}</title>\n</head>\n<body>\n{}\n{}\n</body>\n</html>\n",
        escape(title),
        nav,
        body
    )
}

fn book_card(book: &Book, action: Option<&str>) -> String {
    let mut card = format!(
        "<article class=\"book\">\
         <img src=\"{}\" alt=\"{}\">\
         <h2>{}</h2><p class=\"author\">{}</p><p>{}</p>",
        escape(&book.img),
        escape(&book.title),
        escape(&book.title),
        escape(&book.author),
        escape(&book.description),
    );
    if let Some(action) = action {
        card.push_str(&format!(
            "<form method=\"post\" action=\"/{}/{}\"><button>{}</button></form>",
            action,
            book.id,
            if action == "borrow" { "Borrow" } else { "Return" },
        ));
    } else if book.is_borrowed {
        card.push_str("<p class=\"unavailable\">Currently borrowed</p>");
    }
    card.push_str("</article>");
    card
}

fn home(ctx: &ViewContext) -> String {
    let mut body = String::from("<h1>Catalog</h1>");
    for book in &ctx.books {
        let action = (ctx.is_logged_in && book.is_available()).then_some("borrow");
        body.push_str(&book_card(book, action));
    }
    if !ctx.is_logged_in {
        body.push_str("<p><a href=\"/login\">Log in</a> to borrow books.</p>");
    }
    body
}

fn login(_ctx: &ViewContext) -> String {
    "<h1>Log in</h1>\
     <form method=\"post\" action=\"/login\">\
     <label>Library card number <input name=\"cardNum\" autocomplete=\"off\"></label>\
     <button>Log in</button>\
     </form>"
        .to_string()
}

fn profile(ctx: &ViewContext) -> String {
    let mut body = String::from("<h1>My borrowed books</h1>");
    for book in &ctx.books {
        body.push_str(&book_card(book, Some("return")));
    }
    body
}

fn error(ctx: &ViewContext) -> String {
    let class = if ctx.success { "notice" } else { "error" };
    format!(
        "<h1 class=\"{}\">{}</h1><p><a href=\"/\">Back to the catalog</a></p>",
        class,
        escape(ctx.message.as_deref().unwrap_or("Something went wrong")),
    )
}

fn logout() -> String {
    "<h1>You have been logged out</h1><p><a href=\"/login\">Log in again</a></p>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn error_view_carries_message() {
        let renderer = HtmlRenderer;
        let mut ctx = ViewContext::default();
        ctx.message = Some("No more books available".to_string());
        let page = renderer.render(View::Error, &ctx).unwrap();
        assert!(page.contains("No more books available"));
    }

    #[test]
    fn home_hides_borrow_button_when_logged_out()  {
        let renderer = HtmlRenderer;
        let mut ctx = ViewContext::default();
        ctx.books.push(crate::models::Book {
            id: 1,
            author: "Paulo Coelho".to_string(),
            title: "The Alchemist".to_string(),
            is_borrowed: false,
            borrow_by: String::new(),
            img: "/images/TheAlchemist.jpg".to_string(),
            description: "A fable about following your dream.".to_string(),
        });
        let page = renderer.render(View::Home, &ctx).unwrap();
        assert!(page.contains("The Alchemist"));
        assert!(!page.contains("/borrow/1"));
    }
}
