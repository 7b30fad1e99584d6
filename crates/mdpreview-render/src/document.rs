//! Standalone HTML documents.

use crate::inline::escape_html;

/// Wrap a rendered fragment in a minimal HTML5 document.
pub fn standalone(fragment: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         {}\n\
         </body>\n\
         </html>\n",
        escape_html(title),
        fragment
    )
}
