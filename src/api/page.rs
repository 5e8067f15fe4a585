//! The form page (self-contained, no external resources).

use axum::response::Html;

pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Snaptext — Image to Text</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917;
      max-width: 720px; margin: 0 auto; padding: 32px 24px;
    }
    h1 { font-size: 26px; margin-bottom: 8px; }
    .sub { color: #78716c; font-size: 14px; margin-bottom: 24px; }
    .card {
      background: white; border: 1px solid #e7e5e4; border-radius: 12px;
      padding: 20px; margin-bottom: 20px;
    }
    .card h2 { font-size: 16px; margin-bottom: 12px; }
    .row { display: flex; gap: 12px; align-items: center; flex-wrap: wrap; }
    .btn {
      padding: 10px 18px; border-radius: 10px; font-size: 15px; font-weight: 500;
      cursor: pointer; border: none; background: #4a7c59; color: white;
    }
    .btn.secondary { background: white; color: #44403c; border: 1px solid #d6d3d1; }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    textarea {
      width: 100%; min-height: 180px; margin-top: 12px; padding: 12px;
      border: 1px solid #d6d3d1; border-radius: 10px; font-size: 14px;
      font-family: ui-monospace, SFMono-Regular, Menlo, monospace; resize: vertical;
    }
    .status { margin-top: 12px; font-size: 14px; min-height: 18px; }
    .status.success { color: #16a34a; }
    .status.error { color: #dc2626; }
    a.download { font-size: 14px; color: #4a7c59; }
    ol.issues { margin: 12px 0 0 20px; font-size: 14px; }
    ol.issues li { margin-bottom: 6px; }
    .strike { text-decoration: line-through; color: #dc2626; }
    .fix { color: #16a34a; font-weight: 600; }
    .hidden { display: none; }
  </style>
</head>
<body>
  <h1>&#128247; Snaptext</h1>
  <p class="sub">Upload an image, extract the text, check the spelling.</p>

  <div class="card">
    <h2>1. Extract</h2>
    <div class="row">
      <input type="file" id="file-input" accept="image/png,image/jpeg,image/webp">
      <button class="btn" id="btn-extract" disabled>Extract text</button>
    </div>
    <div class="status" id="extract-status"></div>
    <div id="extract-result" class="hidden">
      <textarea id="extracted-text" readonly></textarea>
      <div class="row" style="margin-top: 8px;">
        <a class="download" href="/api/result/text.txt" download>Download (.txt)</a>
      </div>
    </div>
  </div>

  <div class="card hidden" id="correct-card">
    <h2>2. Check spelling</h2>
    <div class="row">
      <button class="btn secondary" id="btn-correct">Check spelling</button>
    </div>
    <div class="status" id="correct-status"></div>
    <div id="correct-result" class="hidden">
      <textarea id="corrected-text" readonly></textarea>
      <div class="row" style="margin-top: 8px;">
        <a class="download" href="/api/result/corrected.txt" download>Download corrected (.txt)</a>
      </div>
      <ol class="issues" id="issues-list"></ol>
    </div>
  </div>

  <script>
    var fileInput = document.getElementById('file-input');
    var btnExtract = document.getElementById('btn-extract');
    var btnCorrect = document.getElementById('btn-correct');
    var extractStatus = document.getElementById('extract-status');
    var correctStatus = document.getElementById('correct-status');

    fileInput.addEventListener('change', function() {
      btnExtract.disabled = !fileInput.files.length;
    });

    function setStatus(el, text, type) {
      el.textContent = text;
      el.className = 'status ' + (type || '');
    }

    function errorMessage(xhr) {
      try { return JSON.parse(xhr.responseText).error.message; }
      catch (_) { return 'Request failed (' + xhr.status + ')'; }
    }

    btnExtract.addEventListener('click', function() {
      var file = fileInput.files[0];
      if (!file) return;

      var formData = new FormData();
      formData.append('file', file);

      btnExtract.disabled = true;
      setStatus(extractStatus, 'Extracting…', '');

      var xhr = new XMLHttpRequest();
      xhr.open('POST', '/api/extract');
      xhr.onload = function() {
        btnExtract.disabled = false;
        if (xhr.status === 200) {
          var resp = JSON.parse(xhr.responseText);
          document.getElementById('extracted-text').value = resp.text;
          document.getElementById('extract-result').classList.remove('hidden');
          document.getElementById('correct-card').classList.remove('hidden');
          // A new extraction invalidates any old correction on screen
          document.getElementById('correct-result').classList.add('hidden');
          setStatus(correctStatus, '', '');
          var via = resp.method === 'local_tesseract' ? 'local engine' : 'remote service';
          setStatus(extractStatus, resp.chars + ' characters via ' + via, 'success');
        } else {
          setStatus(extractStatus, errorMessage(xhr), 'error');
        }
      };
      xhr.onerror = function() {
        btnExtract.disabled = false;
        setStatus(extractStatus, 'Connection failed.', 'error');
      };
      xhr.send(formData);
    });

    btnCorrect.addEventListener('click', function() {
      btnCorrect.disabled = true;
      setStatus(correctStatus, 'Checking…', '');

      var xhr = new XMLHttpRequest();
      xhr.open('POST', '/api/correct');
      xhr.onload = function() {
        btnCorrect.disabled = false;
        if (xhr.status === 200) {
          var resp = JSON.parse(xhr.responseText);
          document.getElementById('corrected-text').value = resp.corrected;
          var list = document.getElementById('issues-list');
          list.innerHTML = '';
          resp.issues.forEach(function(issue) {
            var li = document.createElement('li');
            var strike = document.createElement('span');
            strike.className = 'strike';
            strike.textContent = issue.original;
            var fix = document.createElement('span');
            fix.className = 'fix';
            fix.textContent = issue.suggestion;
            li.appendChild(strike);
            li.appendChild(document.createTextNode(' → '));
            li.appendChild(fix);
            li.appendChild(document.createTextNode(' (' + issue.explanation + ')'));
            list.appendChild(li);
          });
          document.getElementById('correct-result').classList.remove('hidden');
          setStatus(correctStatus,
            resp.issues.length ? resp.issues.length + ' issue(s) found' : 'No issues found',
            'success');
        } else {
          setStatus(correctStatus, errorMessage(xhr), 'error');
        }
      };
      xhr.onerror = function() {
        btnCorrect.disabled = false;
        setStatus(correctStatus, 'Connection failed.', 'error');
      };
      xhr.send();
    });
  </script>
</body>
</html>"#;
