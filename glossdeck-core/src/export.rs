//! Building the export artifact: one self-contained HTML slideshow with a
//! title slide, a slide per paragraph, a closing slide, and an embedded
//! runtime for navigation, font sizing and explanation reveal. The file
//! references no external assets and works opened straight from disk.

use crate::model::{Paragraph, PresentationMeta, Snapshot};
use crate::render::{escape_html, to_html};

/// Render the full presentation document. With zero paragraphs the result
/// is still a valid deck of just the title and closing slides.
pub fn presentation_html(snapshot: &Snapshot) -> String {
    let mut slides = String::new();
    slides.push_str(&title_slide(&snapshot.meta));
    for (index, paragraph) in snapshot.paragraphs.iter().enumerate() {
        slides.push_str(&content_slide(index, paragraph));
    }
    slides.push_str(&closing_slide(&snapshot.meta));

    let page_title = if snapshot.meta.title.trim().is_empty() {
        "Instructional Presentation".to_string()
    } else {
        escape_html(snapshot.meta.title.trim())
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{page_title}</title>
<style>
{style}
</style>
</head>
<body>
<div id="presentation-container">
{slides}</div>
<div class="controls-container">
  <div class="font-size-controls">
    <button id="decrease-font">A-</button>
    <button id="increase-font">A+</button>
  </div>
  <div class="navigation">
    <button id="prev-slide">Previous</button>
    <button id="next-slide">Next</button>
  </div>
</div>
<div id="explanationModal" class="explanation-modal">
  <div class="modal-content">
    <span class="close-button">&times;</span>
    <h3 id="modalTargetText"></h3>
    <p id="modalExplanation"></p>
  </div>
</div>
<footer class="site-footer"><p>Made with glossdeck</p></footer>
<script>
{runtime}
</script>
</body>
</html>
"#,
        page_title = page_title,
        style = STYLE,
        slides = slides,
        runtime = RUNTIME,
    )
}

fn title_slide(meta: &PresentationMeta) -> String {
    let title = if meta.title.trim().is_empty() {
        "Untitled Presentation".to_string()
    } else {
        escape_html(meta.title.trim())
    };

    let mut body = format!("<h1>{title}</h1>\n");
    if !meta.subtitle.trim().is_empty() {
        body.push_str(&format!(
            "<p class=\"subtitle\">{}</p>\n",
            escape_html(meta.subtitle.trim())
        ));
    }
    body.push_str("<ul class=\"meta-list\">\n");
    for (label, value) in [
        ("Instructor", &meta.instructor_name),
        ("Contact", &meta.contact_info),
        ("Date", &meta.date),
        ("Location", &meta.location),
    ] {
        if !value.trim().is_empty() {
            body.push_str(&format!(
                "<li><strong>{label}:</strong> {}</li>\n",
                escape_html(value.trim())
            ));
        }
    }
    body.push_str("</ul>\n");

    format!("<div class=\"slide\"><div class=\"slide-content\">\n{body}</div></div>\n")
}

fn content_slide(index: usize, paragraph: &Paragraph) -> String {
    format!(
        "<div class=\"slide content-slide\"><div class=\"slide-content paragraph-slide-content\">\n\
         <h2>Paragraph {number}</h2>\n\
         <p class=\"main-paragraph\">{body}</p>\n\
         </div></div>\n",
        number = index + 1,
        body = to_html(&paragraph.text, &paragraph.explanations),
    )
}

fn closing_slide(meta: &PresentationMeta) -> String {
    let mut body = String::from(
        "<h1>Thank You!</h1>\n<p class=\"question-prompt\">Please feel free to ask any questions.</p>\n",
    );
    if !meta.instructor_name.trim().is_empty() {
        body.push_str(&format!(
            "<p><strong>Instructor:</strong> {}</p>\n",
            escape_html(meta.instructor_name.trim())
        ));
    }
    if !meta.contact_info.trim().is_empty() {
        body.push_str(&format!(
            "<p><strong>Contact:</strong> {}</p>\n",
            escape_html(meta.contact_info.trim())
        ));
    }
    format!("<div class=\"slide final-slide\"><div class=\"slide-content\">\n{body}</div></div>\n")
}

/// Turn the presentation title into a safe download filename: keep ASCII
/// letters, digits, whitespace and dashes, replace the rest with
/// underscores, collapse whitespace runs to single dashes, lowercase, cap
/// at 50 characters. Empty or fully-sanitized-away titles fall back to a
/// default name.
pub fn file_name(title: &str) -> String {
    let trimmed = title.trim();
    let mut name = String::new();
    let mut in_whitespace = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('-');
            }
            in_whitespace = true;
        } else if ch.is_ascii_alphanumeric() || ch == '-' {
            name.push(ch.to_ascii_lowercase());
            in_whitespace = false;
        } else {
            name.push('_');
            in_whitespace = false;
        }
    }
    let mut name: String = name.chars().take(50).collect();
    if name.is_empty() {
        name = "untitled_presentation".to_string();
    }
    format!("{name}.html")
}

const STYLE: &str = r#"html { font-size: var(--base-font-size, 16px); }
body {
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
  margin: 0;
  overflow: hidden;
  display: flex;
  flex-direction: column;
  height: 100vh;
  background-color: #f0f2f5;
  color: #333;
}
#presentation-container { flex-grow: 1; position: relative; width: 100%; height: 100%; }
.slide {
  display: none;
  position: absolute;
  top: 0; left: 0;
  width: 100%; height: 100%;
  justify-content: center;
  align-items: center;
  text-align: center;
  padding: 50px;
  box-sizing: border-box;
  background-color: #ffffff;
  transition: opacity 0.5s ease-in-out;
  opacity: 0;
  flex-direction: column;
}
.slide.active { display: flex; opacity: 1; }
.slide-content {
  max-width: 900px;
  width: 100%;
  padding: 20px;
  background: #fff;
  border-radius: 10px;
  box-shadow: 0 4px 15px rgba(0,0,0,0.1);
}
.slide h1 { color: #2c3e50; font-size: 3rem; margin-bottom: 20px; }
.slide h2 { color: #34495e; font-size: 2.2rem; margin-bottom: 15px; }
.slide p { font-size: 1.4rem; line-height: 1.6; color: #555; margin-bottom: 10px; }
.subtitle { font-size: 1.8rem; color: #7f8c8d; }
.meta-list { list-style: none; padding: 0; margin-top: 30px; font-size: 1.2rem; color: #666; }
.meta-list li { margin-bottom: 10px; }
.main-paragraph { text-align: left; white-space: pre-wrap; }
.controls-container {
  position: fixed;
  bottom: 20px;
  width: 100%;
  text-align: center;
  z-index: 99;
  display: flex;
  justify-content: center;
  gap: 10px;
}
.navigation, .font-size-controls { display: flex; gap: 10px; }
.navigation button, .font-size-controls button {
  padding: 12px 25px;
  background-color: #3498db;
  color: white;
  border: none;
  border-radius: 8px;
  cursor: pointer;
  font-size: 18px;
  transition: background-color 0.3s ease, transform 0.2s ease;
  box-shadow: 0 4px 8px rgba(0,0,0,0.2);
}
.navigation button:hover, .font-size-controls button:hover {
  background-color: #2980b9;
  transform: translateY(-2px);
}
.navigation button:disabled, .font-size-controls button:disabled {
  background-color: #ccc;
  cursor: not-allowed;
  box-shadow: none;
}
.font-size-controls button { background-color: #2ecc71; }
.font-size-controls button:hover { background-color: #27ae60; }
.explanation-modal {
  display: none;
  position: fixed;
  z-index: 1000;
  left: 0; top: 0;
  width: 100%; height: 100%;
  background-color: rgba(0,0,0,0.6);
  justify-content: center;
  align-items: center;
  backdrop-filter: blur(5px);
}
.modal-content {
  background-color: #ffffff;
  padding: 30px;
  border-radius: 12px;
  width: 90%;
  max-width: 600px;
  box-shadow: 0 8px 25px rgba(0,0,0,0.3);
  position: relative;
  animation: fadeInScale 0.3s ease-out;
  text-align: left;
}
.modal-content h3 {
  color: #3498db;
  margin-top: 0;
  font-size: 1.8rem;
  border-bottom: 2px solid #eee;
  padding-bottom: 10px;
  margin-bottom: 15px;
}
.modal-content p { font-size: 1.2rem; line-height: 1.5; color: #444; }
.close-button {
  color: #aaa;
  font-size: 36px;
  font-weight: bold;
  cursor: pointer;
  position: absolute;
  top: 10px;
  right: 20px;
  line-height: 1;
  transition: color 0.2s ease;
}
.close-button:hover, .close-button:focus { color: #333; }
.highlighted-text {
  cursor: pointer;
  text-decoration: underline dotted #3498db;
  color: #3498db;
  font-weight: bold;
  transition: color 0.2s ease, text-decoration-color 0.2s ease;
}
.highlighted-text:hover { color: #2980b9; text-decoration-color: #2980b9; }
@keyframes fadeInScale {
  from { opacity: 0; transform: scale(0.9); }
  to { opacity: 1; transform: scale(1); }
}
.site-footer {
  color: #7f8c8d;
  font-size: 12px;
  position: fixed;
  bottom: 10px;
  left: 10px;
  z-index: 100;
}
.site-footer p { margin: 0; line-height: 1.2; }"#;

const RUNTIME: &str = r#"let currentSlideIndex = 0;
const slides = Array.from(document.querySelectorAll('.slide'));
const modal = document.getElementById('explanationModal');
const modalTargetText = document.getElementById('modalTargetText');
const modalExplanation = document.getElementById('modalExplanation');
const closeButton = document.querySelector('.close-button');
const prevButton = document.getElementById('prev-slide');
const nextButton = document.getElementById('next-slide');
const decreaseFontButton = document.getElementById('decrease-font');
const increaseFontButton = document.getElementById('increase-font');

let currentBaseFontSizePx = 16;
const MIN_FONT_SIZE = 12;
const MAX_FONT_SIZE = 24;
const FONT_SIZE_STEP = 2;

function updateFontSize() {
  document.documentElement.style.setProperty('--base-font-size', `${currentBaseFontSizePx}px`);
}

function adjustFontSize(delta) {
  const newSize = Math.max(MIN_FONT_SIZE, Math.min(MAX_FONT_SIZE, currentBaseFontSizePx + delta));
  if (newSize !== currentBaseFontSizePx) {
    currentBaseFontSizePx = newSize;
    updateFontSize();
  }
}

function updateNavigationButtons() {
  prevButton.disabled = currentSlideIndex === 0;
  nextButton.disabled = currentSlideIndex === slides.length - 1;
}

function showSlide(index) {
  if (index < 0 || index >= slides.length) return;
  slides.forEach(slide => slide.classList.remove('active'));
  slides[index].classList.add('active');
  currentSlideIndex = index;
  updateNavigationButtons();
}

function openModal(targetText, explanation) {
  modalTargetText.textContent = targetText;
  modalExplanation.textContent = explanation;
  modal.style.display = 'flex';
}

function closeModal() {
  modal.style.display = 'none';
}

closeButton.onclick = closeModal;
window.onclick = function (event) {
  if (event.target == modal) {
    closeModal();
  }
};

prevButton.addEventListener('click', () => showSlide(currentSlideIndex - 1));
nextButton.addEventListener('click', () => showSlide(currentSlideIndex + 1));
decreaseFontButton.addEventListener('click', () => adjustFontSize(-FONT_SIZE_STEP));
increaseFontButton.addEventListener('click', () => adjustFontSize(FONT_SIZE_STEP));

document.addEventListener('keydown', (e) => {
  if (modal.style.display === 'flex') {
    if (e.key === 'Escape') {
      closeModal();
    }
    return;
  }
  if (e.key === 'ArrowRight') {
    showSlide(currentSlideIndex + 1);
  } else if (e.key === 'ArrowLeft') {
    showSlide(currentSlideIndex - 1);
  }
});

document.getElementById('presentation-container').addEventListener('click', (event) => {
  if (event.target.classList.contains('highlighted-text')) {
    openModal(event.target.dataset.target, event.target.dataset.explanation);
  }
});

if (slides.length > 0) {
  showSlide(0);
}
updateFontSize();"#;
