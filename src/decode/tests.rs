//! Tests for the XML element-tree conversion

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_simple_document() {
    let xml = "<Root><Name>ruby</Name><Count>42</Count></Root>";
    let value = xml_to_value(xml).unwrap();
    assert_eq!(value, json!({"Root": {"Name": "ruby", "Count": 42}}));
}

#[test]
fn test_prolog_and_comments_skipped() {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- generated -->
<Root><Value>1</Value><!-- inline --><Other>x</Other></Root>"#;
    let value = xml_to_value(xml).unwrap();
    assert_eq!(value, json!({"Root": {"Value": 1, "Other": "x"}}));
}

#[test]
fn test_repeated_siblings_become_array() {
    let xml = "<Results>\
        <Job><Title>a</Title></Job>\
        <Job><Title>b</Title></Job>\
        <Job><Title>c</Title></Job>\
    </Results>";
    let value = xml_to_value(xml).unwrap();
    let jobs = &value["Results"]["Job"];
    assert_eq!(jobs.as_array().map(Vec::len), Some(3));
    assert_eq!(jobs[1]["Title"], json!("b"));
}

#[test]
fn test_single_child_stays_bare() {
    let xml = "<Results><Job><Title>only</Title></Job></Results>";
    let value = xml_to_value(xml).unwrap();
    assert!(value["Results"]["Job"].is_object());

    // element_list smooths over the single/repeated difference
    let singles = element_list(&value["Results"]["Job"]);
    assert_eq!(singles.len(), 1);

    let many = xml_to_value("<R><J>1</J><J>2</J></R>").unwrap();
    assert_eq!(element_list(&many["R"]["J"]).len(), 2);
    assert_eq!(element_list(&Value::Null).len(), 0);
}

#[test]
fn test_empty_and_self_closing_elements() {
    let xml = "<Root><Empty></Empty><Closed/></Root>";
    let value = xml_to_value(xml).unwrap();
    assert_eq!(value["Root"]["Empty"], Value::Null);
    assert_eq!(value["Root"]["Closed"], Value::Null);
}

#[test]
fn test_attributes_skipped() {
    let xml = r#"<Root total="9"><Item kind="a">text</Item></Root>"#;
    let value = xml_to_value(xml).unwrap();
    assert_eq!(value["Root"]["Item"], json!("text"));
}

#[test]
fn test_entity_unescaping() {
    let xml = "<Root><T>C&amp;C &lt;senior&gt;</T></Root>";
    let value = xml_to_value(xml).unwrap();
    assert_eq!(value["Root"]["T"], json!("C&C <senior>"));
}

#[test]
fn test_typed_text() {
    let xml = "<Root><I>7</I><F>2.5</F><B>true</B><S>7 dwarfs</S></Root>";
    let value = xml_to_value(xml).unwrap();
    assert_eq!(value["Root"]["I"], json!(7));
    assert_eq!(value["Root"]["F"], json!(2.5));
    assert_eq!(value["Root"]["B"], json!(true));
    assert_eq!(value["Root"]["S"], json!("7 dwarfs"));
}

#[test]
fn test_malformed_documents_error() {
    assert!(xml_to_value("not xml at all").is_err());
    assert!(xml_to_value("<Root><Open></Root>").is_err());
    assert!(xml_to_value("<Root>x</Root><Extra/>").is_err());
    assert!(xml_to_value("<Root").is_err());
}

#[test]
fn test_careerbuilder_shape() {
    // the structure the CareerBuilder adapter actually navigates
    let xml = "<ResponseJobSearch>\
        <TotalCount>100</TotalCount>\
        <TotalPages>4</TotalPages>\
        <Results>\
            <JobSearchResult>\
                <JobTitle>Rust Engineer</JobTitle>\
                <Company>Acme</Company>\
                <State>NY</State>\
                <City>New York</City>\
                <PostedDate>6/30/2016</PostedDate>\
                <JobDetailsURL>https://jobs.example.com/1</JobDetailsURL>\
            </JobSearchResult>\
        </Results>\
        <SearchMetaData>\
            <SearchLocations>\
                <Location><StateCode>NY</StateCode><City>USA-NY</City></Location>\
            </SearchLocations>\
        </SearchMetaData>\
    </ResponseJobSearch>";

    let value = xml_to_value(xml).unwrap();
    let root = &value["ResponseJobSearch"];
    assert_eq!(root["TotalCount"], json!(100));
    assert_eq!(root["TotalPages"], json!(4));
    let results = element_list(&root["Results"]["JobSearchResult"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["JobTitle"], json!("Rust Engineer"));
    let locations = element_list(&root["SearchMetaData"]["SearchLocations"]["Location"]);
    assert_eq!(locations[0]["StateCode"], json!("NY"));
}
