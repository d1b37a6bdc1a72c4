//! Page bodies rendered inside the shared layout

use scribe_common::db::models::{Recording, RecordingOverview, Transcription, WorkerType};

use super::escape_html;
use crate::pagination::Pagination;

/// Landing page
pub fn index_body() -> String {
    r#"<section class="hero">
    <h2>Speech recognition in the browser</h2>
    <p>Scribe is a speech transcription platform. Try one of the available
    recognition models in the <a href="/demo">live demo</a>, read the
    <a href="/documentation">API documentation</a>, or browse the
    <a href="/worker-types">worker types</a> currently on offer.</p>
    <p>You can also help us improve the recognizers: pick a model on the
    <a href="/worker-types">worker types</a> page and transcribe a few of the
    recordings our users submitted. No account needed.</p>
</section>"#
        .to_string()
}

/// Live demo page; the recorder script reads the data attributes
pub fn demo_body(api_url: &str, model: Option<&str>) -> String {
    let model_attr = match model {
        Some(model) => format!(r#" data-model="{}""#, escape_html(model)),
        None => String::new(),
    };

    format!(
        r#"<section class="demo" id="demo" data-api-url="{api_url}"{model_attr}>
    <h2>Live demo</h2>
    <p>Record a short utterance and it will be sent to the recognition API for
    transcription.</p>
    <div class="demo-controls">
        <select id="demo-model"></select>
        <button id="demo-record" class="button">Start recording</button>
    </div>
    <p id="demo-status" class="demo-status">Ready.</p>
    <pre id="demo-result" class="demo-result"></pre>
</section>
<script src="/static/demo.js"></script>"#,
        api_url = escape_html(api_url),
        model_attr = model_attr,
    )
}

/// API documentation page
pub fn documentation_body(api_url: &str) -> String {
    let api_url = escape_html(api_url);
    format!(
        r#"<section class="documentation">
    <h2>API documentation</h2>
    <p>The recognition API is served from <code>{api_url}</code>.</p>

    <h3>Batch recognition</h3>
    <p>POST audio data to <code>{api_url}/recognize?model=&lt;model&gt;</code>
    with a <code>Content-Type</code> describing the audio format. The response
    is a JSON document with the recognized hypotheses and their confidence
    scores.</p>

    <h3>Available workers</h3>
    <p>GET <a href="/available-workers"><code>/available-workers</code></a>
    lists the models currently online. Each entry carries the model
    identifier accepted by the <code>model</code> parameter above.</p>

    <h3>Models</h3>
    <p>The list of deployed models, with descriptions, lives on the
    <a href="/worker-types">worker types</a> page.</p>
</section>"#,
        api_url = api_url,
    )
}

/// Worker type listing; admins get edit links and a create button
pub fn worker_types_body(workers: &[WorkerType], viewer_is_admin: bool) -> String {
    let mut rows = String::new();
    for worker in workers {
        let admin_cell = if viewer_is_admin {
            format!(
                r#"<td><a href="/edit-worker/{id}">Edit</a></td>"#,
                id = escape_html(&worker.id)
            )
        } else {
            String::new()
        };

        rows.push_str(&format!(
            r#"        <tr>
            <td><code>{id}</code></td>
            <td>{name}</td>
            <td>{description}</td>
            <td>{availability}</td>
            <td><a href="/demo/{id}">Demo</a> <a href="/transcribe/{id}">Transcribe</a></td>
            {admin_cell}
        </tr>
"#,
            id = escape_html(&worker.id),
            name = escape_html(worker.name.as_deref().unwrap_or("")),
            description = escape_html(worker.description.as_deref().unwrap_or("")),
            availability = if worker.available { "online" } else { "offline" },
            admin_cell = admin_cell,
        ));
    }

    let admin_header = if viewer_is_admin { "<th></th>" } else { "" };
    let admin_toolbar = if viewer_is_admin {
        r#"    <p><a class="button" href="/new-worker">New worker type</a></p>
"#
    } else {
        ""
    };

    format!(
        r#"<section class="worker-types">
    <h2>Worker types</h2>
{admin_toolbar}    <table>
        <thead>
        <tr><th>Model</th><th>Name</th><th>Description</th><th>Status</th><th></th>{admin_header}</tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
</section>"#,
        admin_toolbar = admin_toolbar,
        admin_header = admin_header,
        rows = rows,
    )
}

/// Transcription form for one recording
pub fn transcribe_body(recording: &Recording, backlink: &str) -> String {
    format!(
        r#"<section class="transcribe">
    <h2>Transcribe a recording</h2>
    <p>Model: <code>{model}</code></p>
    <audio controls src="{url}"></audio>
    <form method="post" action="/save-transcription">
        <input type="hidden" name="id" value="{id}">
        <input type="hidden" name="backlink" value="{backlink}">
        <label for="transcription">What do you hear?</label>
        <textarea id="transcription" name="transcription" rows="3" required></textarea>
        <label><input type="checkbox" name="native_speaker"> I am a native speaker</label>
        <label><input type="checkbox" name="offensive_language"> Contains offensive language</label>
        <label><input type="checkbox" name="not_a_speech"> This is not speech</label>
        <div class="form-actions">
            <button type="submit" class="button">Save transcription</button>
            <a href="{backlink}">Skip this recording</a>
        </div>
    </form>
</section>"#,
        model = escape_html(&recording.model),
        url = escape_html(&recording.url),
        id = recording.id,
        backlink = escape_html(backlink),
    )
}

/// Admin: paginated recordings listing for one model
pub fn recordings_body(
    model: &str,
    recordings: &[RecordingOverview],
    pagination: &Pagination,
) -> String {
    let mut rows = String::new();
    for recording in recordings {
        rows.push_str(&format!(
            r#"        <tr>
            <td><a href="/transcriptions/{id}">#{id}</a></td>
            <td><audio controls preload="none" src="{url}"></audio></td>
            <td>{score:.2}</td>
            <td>{count}</td>
            <td>{created}</td>
        </tr>
"#,
            id = recording.id,
            url = escape_html(&recording.url),
            score = recording.score,
            count = recording.transcription_count,
            created = escape_html(&recording.created_at),
        ));
    }

    let model_esc = escape_html(model);
    let prev = if pagination.has_prev() {
        format!(
            r#"<a href="/recordings/{}/{}">&laquo; Newer</a>"#,
            model_esc,
            pagination.page - 1
        )
    } else {
        String::new()
    };
    let next = if pagination.has_next() {
        format!(
            r#"<a href="/recordings/{}/{}">Older &raquo;</a>"#,
            model_esc,
            pagination.page + 1
        )
    } else {
        String::new()
    };

    format!(
        r#"<section class="recordings">
    <h2>Recordings for <code>{model}</code></h2>
    <table>
        <thead>
        <tr><th>Recording</th><th>Audio</th><th>Score</th><th>Transcriptions</th><th>Created</th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
    <div class="pager">
        {prev}
        <span>Page {page} of {total_pages}</span>
        {next}
    </div>
</section>"#,
        model = model_esc,
        rows = rows,
        prev = prev,
        page = pagination.page,
        total_pages = pagination.total_pages.max(1),
        next = next,
    )
}

/// Admin: one recording with all submitted transcriptions
pub fn transcriptions_body(recording: &Recording, transcriptions: &[Transcription]) -> String {
    let mut rows = String::new();
    for t in transcriptions {
        let mut flags = Vec::new();
        if t.native_speaker {
            flags.push("native speaker");
        }
        if t.offensive_language {
            flags.push("offensive language");
        }
        if t.not_a_speech {
            flags.push("not speech");
        }

        rows.push_str(&format!(
            r#"        <tr>
            <td>{text}</td>
            <td>{user}</td>
            <td>{flags}</td>
            <td>{created}</td>
        </tr>
"#,
            text = escape_html(&t.text),
            user = escape_html(t.user_id.as_deref().unwrap_or("anonymous")),
            flags = flags.join(", "),
            created = escape_html(&t.created_at),
        ));
    }

    let submissions = if transcriptions.is_empty() {
        "    <p>No transcriptions submitted yet.</p>\n".to_string()
    } else {
        format!(
            r#"    <table>
        <thead>
        <tr><th>Transcription</th><th>User</th><th>Flags</th><th>Submitted</th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
"#,
            rows = rows
        )
    };

    format!(
        r#"<section class="transcriptions">
    <h2>Recording #{id}</h2>
    <p>Model: <code>{model}</code></p>
    <audio controls src="{url}"></audio>
{submissions}    <p><a href="/recordings/{model}/1">Back to recordings</a></p>
</section>"#,
        id = recording.id,
        model = escape_html(&recording.model),
        url = escape_html(&recording.url),
        submissions = submissions,
    )
}

/// Admin: worker type edit form; None renders the blank "new worker" form
pub fn edit_worker_body(worker: Option<&WorkerType>) -> String {
    let (heading, name, description, id_field) = match worker {
        Some(worker) => (
            "Edit worker type",
            escape_html(worker.name.as_deref().unwrap_or("")),
            escape_html(worker.description.as_deref().unwrap_or("")),
            format!(
                r#"<input type="hidden" name="id" value="{id}">
        <p>Model: <code>{id}</code></p>"#,
                id = escape_html(&worker.id)
            ),
        ),
        None => (
            "New worker type",
            String::new(),
            String::new(),
            r#"<label for="worker-id">Model identifier</label>
        <input id="worker-id" type="text" name="id" required>"#
                .to_string(),
        ),
    };

    format!(
        r#"<section class="edit-worker">
    <h2>{heading}</h2>
    <form method="post" action="/save-worker-description">
        {id_field}
        <label for="worker-name">Display name</label>
        <input id="worker-name" type="text" name="name" value="{name}">
        <label for="worker-description">Description</label>
        <textarea id="worker-description" name="description" rows="5">{description}</textarea>
        <div class="form-actions">
            <button type="submit" class="button">Save</button>
            <a href="/worker-types">Cancel</a>
        </div>
    </form>
</section>"#,
        heading = heading,
        id_field = id_field,
        name = name,
        description = description,
    )
}
