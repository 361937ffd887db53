//! Server-rendered HTML for the campaign form and list.

use crate::campaign::{Campaign, CAMPAIGN_NEGATIVE_MATCH_TYPES};

const MATCH_TYPES: [&str; 3] = ["Exact", "Phrase", "Broad"];
const AD_GROUP_NEGATIVE_MATCH_TYPES: [&str; 2] = ["negative exact", "negative phrase"];

pub fn home() -> String {
    layout(
        "Campaigns",
        r#"<h1>Sponsored Products campaigns</h1>
<ul>
  <li><a href="/campaign">New campaign</a></li>
  <li><a href="/show/campaigns">Stored campaigns</a></li>
</ul>"#,
    )
}

pub fn campaign_form() -> String {
    let match_types = options(MATCH_TYPES.iter().copied());
    let negative_match_types = options(
        std::iter::once("none")
            .chain(AD_GROUP_NEGATIVE_MATCH_TYPES.iter().copied())
            .chain(CAMPAIGN_NEGATIVE_MATCH_TYPES.iter().copied()),
    );

    let body = format!(
        r#"<h1>New campaign</h1>
<form method="post" action="/campaign">
  <label>Campaign name <input name="campaign_name" required></label>
  <label>Daily budget <input name="daily_budget" inputmode="decimal"></label>
  <label>Match type <select name="match_type">{match_types}</select></label>
  <label>Bid <input name="bid" inputmode="decimal"></label>
  <label>SKU <input name="sku"></label>
  <label>Keywords per campaign <input name="total_keywords" inputmode="numeric" placeholder="all"></label>
  <label>Keywords <textarea name="keywords" rows="10"></textarea></label>
  <label>Negative match type <select name="negative_match_type">{negative_match_types}</select></label>
  <label>Negative keywords <textarea name="negative_keywords" rows="5"></textarea></label>
  <button type="submit">Save</button>
</form>
<p><a href="/show/campaigns">Stored campaigns</a></p>"#,
        match_types = match_types,
        negative_match_types = negative_match_types,
    );

    layout("New campaign", &body)
}

pub fn campaign_list(campaigns: &[Campaign]) -> String {
    let mut rows = String::new();
    for campaign in campaigns {
        let id = match campaign.id {
            Some(id) => id.to_string(),
            None => continue,
        };
        rows.push_str(&format!(
            r#"<tr>
  <td>{name}</td><td>{start_date}</td><td>{budget}</td><td>{match_type}</td><td>{bid}</td>
  <td>{sku}</td><td>{per_block}</td><td>{keywords}</td><td>{negative_match_type}</td><td>{negatives}</td>
  <td><form method="post" action="/export/{id}"><button type="submit">Export</button></form></td>
  <td><a href="/delete/{id}">Delete</a></td>
</tr>
"#,
            name = escape(&campaign.campaign_name),
            start_date = escape(&campaign.start_date),
            budget = escape(&campaign.daily_budget),
            match_type = escape(&campaign.match_type),
            bid = escape(&campaign.bid),
            sku = escape(&campaign.sku),
            per_block = campaign.total_keywords_per_block,
            keywords = campaign.keywords.len(),
            negative_match_type = escape(&campaign.negative_match_type),
            negatives = campaign.negative_keywords.len(),
            id = id,
        ));
    }

    let body = format!(
        r#"<h1>Stored campaigns</h1>
<table>
<thead><tr>
  <th>Campaign</th><th>Start date</th><th>Daily budget</th><th>Match type</th><th>Bid</th>
  <th>SKU</th><th>Keywords per campaign</th><th>Keywords</th><th>Negative match type</th><th>Negative keywords</th>
  <th></th><th></th>
</tr></thead>
<tbody>
{rows}</tbody>
</table>
<p><a href="/campaign">New campaign</a></p>"#,
        rows = rows
    );

    layout("Stored campaigns", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn options<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values
        .map(|value| format!(r#"<option value="{0}">{0}</option>"#, escape(value)))
        .collect()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::test::campaign;

    #[test]
    fn form_posts_every_campaign_field() {
        let page = campaign_form();

        for field in [
            "campaign_name",
            "daily_budget",
            "match_type",
            "bid",
            "sku",
            "total_keywords",
            "keywords",
            "negative_match_type",
            "negative_keywords",
        ] {
            assert!(
                page.contains(&format!(r#"name="{}""#, field)),
                "missing {}",
                field
            );
        }
        assert!(page.contains(r#"<option value="campaign negative phrase">"#));
    }

    #[test]
    fn list_links_export_and_delete_by_id() {
        let campaign = campaign(&["a", "b"], 2);
        let id = campaign.id.unwrap();

        let page = campaign_list(&[campaign]);

        assert!(page.contains(&format!(r#"action="/export/{}""#, id)));
        assert!(page.contains(&format!(r#"href="/delete/{}""#, id)));
        assert!(page.contains("Trail Shoes"));
    }

    #[test]
    fn list_escapes_user_text() {
        let mut campaign = campaign(&["a"], 1);
        campaign.campaign_name = "<b>Shoes & Socks</b>".into();

        let page = campaign_list(&[campaign]);

        assert!(page.contains("&lt;b&gt;Shoes &amp; Socks&lt;/b&gt;"));
        assert!(!page.contains("<b>Shoes"));
    }
}
