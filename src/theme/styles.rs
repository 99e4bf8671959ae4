//! Global CSS styles for RIP MIND.
//!
//! Dark paper-and-ink look: one centered column, one step at a time.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --ink: #0d0d0f;
  --ink-raised: #17171b;
  --ink-border: #2a2a30;

  --paper: #f1ece2;
  --paper-muted: rgba(241, 236, 226, 0.6);

  --candle: #e0b060;
  --candle-glow: rgba(224, 176, 96, 0.25);
  --danger: #e0605a;

  --font-serif: 'Nanum Myeongjo', Georgia, serif;
  --font-sans: 'Pretendard', 'Helvetica Neue', sans-serif;

  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-sans);
  background: var(--ink);
  color: var(--paper);
  line-height: 1.6;
  min-height: 100vh;
}

/* === Navigation === */
.nav-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 1rem 1.5rem;
  border-bottom: 1px solid var(--ink-border);
}

.nav-title {
  font-family: var(--font-serif);
  letter-spacing: 0.2em;
  color: var(--candle);
}

.nav-toggle {
  display: flex;
  flex-direction: column;
  gap: 4px;
  background: none;
  border: none;
  cursor: pointer;
  padding: 0.25rem;
}

.nav-toggle span {
  display: block;
  width: 22px;
  height: 2px;
  background: var(--paper);
  transition: transform var(--transition-fast), opacity var(--transition-fast);
}

.nav-toggle.open span:nth-child(1) { transform: translateY(6px) rotate(45deg); }
.nav-toggle.open span:nth-child(2) { opacity: 0; }
.nav-toggle.open span:nth-child(3) { transform: translateY(-6px) rotate(-45deg); }

.nav-overlay {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.5);
  z-index: 20;
}

.nav-drawer {
  position: absolute;
  top: 0;
  right: 0;
  width: 60%;
  height: 100%;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  padding: 4rem 1.5rem;
  background: var(--ink-raised);
}

.nav-item {
  background: none;
  border: none;
  color: var(--paper);
  font-size: 1.1rem;
  text-align: left;
  padding: 0.5rem 0;
  cursor: pointer;
}

.nav-item:hover { color: var(--candle); }

/* === Steps === */
.letter-page {
  max-width: 440px;
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

.step {
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
}

.step-title {
  font-family: var(--font-serif);
  font-size: 1.5rem;
  font-weight: 400;
}

.step-text { color: var(--paper-muted); }

.step-sending {
  text-align: center;
  padding: 4rem 0;
  color: var(--candle);
  animation: flicker 1.5s ease-in-out infinite;
}

@keyframes flicker {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.4; }
}

.step-actions, .choice-actions {
  display: flex;
  gap: 0.75rem;
  justify-content: flex-end;
}

.choice-actions { flex-direction: column; }

.startup-error { color: var(--danger); }

/* === Forms === */
.form-group {
  display: flex;
  flex-direction: column;
  gap: 0.35rem;
}

.form-label { color: var(--paper-muted); font-size: 0.875rem; }
.counter { margin-left: 0.25rem; }

.form-input, .letter-input {
  background: var(--ink-raised);
  border: 1px solid var(--ink-border);
  color: var(--paper);
  padding: 0.6rem 0.75rem;
  font: inherit;
}

.form-input:focus, .letter-input:focus {
  outline: none;
  border-color: var(--candle);
  box-shadow: 0 0 0 2px var(--candle-glow);
}

.letter-input {
  min-height: 320px;
  resize: vertical;
  font-family: var(--font-serif);
}

.form-check {
  display: flex;
  gap: 0.5rem;
  font-size: 0.875rem;
  color: var(--paper-muted);
}

/* === Buttons === */
.btn-primary, .btn-secondary, .btn-ghost, .btn-choice {
  font: inherit;
  padding: 0.6rem 1.2rem;
  cursor: pointer;
  transition: background var(--transition-fast), color var(--transition-fast);
}

.btn-primary { background: var(--candle); color: var(--ink); border: none; }
.btn-secondary { background: none; color: var(--paper); border: 1px solid var(--ink-border); }
.btn-ghost { background: none; color: var(--paper-muted); border: none; margin-right: auto; }

.btn-choice {
  background: var(--ink-raised);
  color: var(--paper);
  border: 1px solid var(--ink-border);
  padding: 1.25rem;
  font-family: var(--font-serif);
  font-size: 1.1rem;
}

.btn-choice:hover { border-color: var(--candle); }

/* === Archive List === */
.letter-list { list-style: none; }

.letter-row {
  display: flex;
  justify-content: space-between;
  padding: 0.75rem 0.5rem;
  border-bottom: 1px solid var(--ink-border);
  cursor: pointer;
}

.letter-row.selected { color: var(--candle); }
.letter-row.placeholder { cursor: default; color: var(--paper-muted); justify-content: center; }
.letter-time { color: var(--paper-muted); font-size: 0.8rem; }

/* === Live Wall === */
.wall { list-style: none; display: flex; flex-direction: column; gap: 1rem; }

.wall-entry {
  background: var(--ink-raised);
  border: 1px solid var(--ink-border);
  padding: 1rem;
}

.wall-header { display: flex; justify-content: space-between; margin-bottom: 0.5rem; }
.wall-content { white-space: pre-wrap; font-family: var(--font-serif); }

/* === Modals === */
.detail-overlay, .alert-overlay {
  position: fixed;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: center;
  background: rgba(0, 0, 0, 0.7);
  z-index: 30;
}

.detail-overlay:focus { outline: none; }

.detail-card, .alert-card {
  position: relative;
  max-width: 400px;
  width: 90%;
  max-height: 80vh;
  overflow-y: auto;
  background: var(--ink-raised);
  border: 1px solid var(--ink-border);
  padding: 2rem 1.5rem;
}

.detail-close {
  position: absolute;
  top: 0.5rem;
  right: 0.75rem;
  background: none;
  border: none;
  color: var(--paper-muted);
  font-size: 1.5rem;
  cursor: pointer;
}

.detail-title { font-family: var(--font-serif); font-weight: 400; }
.detail-since { color: var(--paper-muted); font-size: 0.8rem; margin-bottom: 1.25rem; }
.detail-content { white-space: pre-wrap; font-family: var(--font-serif); }

.alert-card { display: flex; flex-direction: column; gap: 1.25rem; align-items: flex-end; }
.alert-card p { align-self: stretch; }
"#;
