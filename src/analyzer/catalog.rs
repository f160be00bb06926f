//! Built-in directive catalog.
//!
//! One entry per directive name; each entry lists every valid usage form as
//! a bitmask. The table covers the stock nginx modules (core, events, http,
//! stream, mail). Extensions contribute additional entries through the
//! registry at startup.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{
    NGX_ANY_CONF, NGX_CONF_1MORE, NGX_CONF_2MORE, NGX_CONF_BLOCK, NGX_CONF_FLAG, NGX_CONF_NOARGS,
    NGX_CONF_TAKE1, NGX_CONF_TAKE12, NGX_CONF_TAKE123, NGX_CONF_TAKE1234, NGX_CONF_TAKE2,
    NGX_CONF_TAKE23, NGX_CONF_TAKE34, NGX_DIRECT_CONF, NGX_EVENT_CONF, NGX_HTTP_LIF_CONF,
    NGX_HTTP_LMT_CONF, NGX_HTTP_LOC_CONF, NGX_HTTP_MAIN_CONF, NGX_HTTP_SIF_CONF,
    NGX_HTTP_SRV_CONF, NGX_HTTP_UPS_CONF, NGX_MAIL_MAIN_CONF, NGX_MAIL_SRV_CONF, NGX_MAIN_CONF,
    NGX_STREAM_MAIN_CONF, NGX_STREAM_SRV_CONF, NGX_STREAM_UPS_CONF,
};

// table shorthands; DMAIN marks directives confined to the main file itself
const MAIN: u64 = NGX_MAIN_CONF;
const DMAIN: u64 = NGX_MAIN_CONF | NGX_DIRECT_CONF;
const EV: u64 = NGX_EVENT_CONF;
const MMAIN: u64 = NGX_MAIL_MAIN_CONF;
const MSRV: u64 = NGX_MAIL_SRV_CONF;
const SMAIN: u64 = NGX_STREAM_MAIN_CONF;
const SSRV: u64 = NGX_STREAM_SRV_CONF;
const SUPS: u64 = NGX_STREAM_UPS_CONF;
const HMAIN: u64 = NGX_HTTP_MAIN_CONF;
const HSRV: u64 = NGX_HTTP_SRV_CONF;
const HLOC: u64 = NGX_HTTP_LOC_CONF;
const HUPS: u64 = NGX_HTTP_UPS_CONF;
const HSIF: u64 = NGX_HTTP_SIF_CONF;
const HLIF: u64 = NGX_HTTP_LIF_CONF;
const HLMT: u64 = NGX_HTTP_LMT_CONF;
const HSL: u64 = HMAIN | HSRV | HLOC;
const ANYCTX: u64 = NGX_ANY_CONF;

const NOARGS: u64 = NGX_CONF_NOARGS;
const T1: u64 = NGX_CONF_TAKE1;
const T2: u64 = NGX_CONF_TAKE2;
const T12: u64 = NGX_CONF_TAKE12;
const T23: u64 = NGX_CONF_TAKE23;
const T34: u64 = NGX_CONF_TAKE34;
const T123: u64 = NGX_CONF_TAKE123;
const T1234: u64 = NGX_CONF_TAKE1234;
const BLOCK: u64 = NGX_CONF_BLOCK;
const FLAG: u64 = NGX_CONF_FLAG;
const M1: u64 = NGX_CONF_1MORE;
const M2: u64 = NGX_CONF_2MORE;

static DIRECTIVES: &[(&str, &[u64])] = &[
    ("absolute_redirect", &[HSL | FLAG]),
    ("accept_mutex", &[EV | FLAG]),
    ("accept_mutex_delay", &[EV | T1]),
    ("access_log", &[HSL | HLIF | HLMT | M1, SMAIN | SSRV | M1]),
    ("add_after_body", &[HSL | T1]),
    ("add_before_body", &[HSL | T1]),
    ("add_header", &[HSL | HLIF | T23]),
    ("add_trailer", &[HSL | HLIF | T23]),
    ("addition_types", &[HSL | M1]),
    ("aio", &[HSL | T1]),
    ("aio_write", &[HSL | FLAG]),
    ("alias", &[HLOC | T1]),
    ("allow", &[HSL | HLMT | T1, SMAIN | SSRV | T1]),
    ("ancient_browser", &[HSL | M1]),
    ("ancient_browser_value", &[HSL | T1]),
    ("auth_basic", &[HSL | HLMT | T1]),
    ("auth_basic_user_file", &[HSL | HLMT | T1]),
    ("auth_delay", &[HSL | T1]),
    ("auth_http", &[MMAIN | MSRV | T1]),
    ("auth_http_header", &[MMAIN | MSRV | T2]),
    ("auth_http_pass_client_cert", &[MMAIN | MSRV | FLAG]),
    ("auth_http_timeout", &[MMAIN | MSRV | T1]),
    ("auth_request", &[HSL | T1]),
    ("auth_request_set", &[HSL | T2]),
    ("autoindex", &[HSL | FLAG]),
    ("autoindex_exact_size", &[HSL | FLAG]),
    ("autoindex_format", &[HSL | T1]),
    ("autoindex_localtime", &[HSL | FLAG]),
    ("break", &[HSRV | HLOC | HSIF | HLIF | NOARGS]),
    ("charset", &[HSL | HLIF | T1]),
    ("charset_map", &[HMAIN | BLOCK | T2]),
    ("charset_types", &[HSL | M1]),
    ("chunked_transfer_encoding", &[HSL | FLAG]),
    ("client_body_buffer_size", &[HSL | T1]),
    ("client_body_in_file_only", &[HSL | T1]),
    ("client_body_in_single_buffer", &[HSL | FLAG]),
    ("client_body_temp_path", &[HSL | T1234]),
    ("client_body_timeout", &[HSL | T1]),
    ("client_header_buffer_size", &[HMAIN | HSRV | T1]),
    ("client_header_timeout", &[HMAIN | HSRV | T1]),
    ("client_max_body_size", &[HSL | T1]),
    ("connection_pool_size", &[HMAIN | HSRV | T1]),
    ("create_full_put_path", &[HSL | FLAG]),
    ("daemon", &[DMAIN | FLAG]),
    ("dav_access", &[HSL | T123]),
    ("dav_methods", &[HSL | M1]),
    ("debug_connection", &[EV | T1]),
    ("debug_points", &[DMAIN | T1]),
    ("default_type", &[HSL | T1]),
    ("deny", &[HSL | HLMT | T1, SMAIN | SSRV | T1]),
    ("directio", &[HSL | T1]),
    ("directio_alignment", &[HSL | T1]),
    ("disable_symlinks", &[HSL | T12]),
    ("empty_gif", &[HLOC | NOARGS]),
    ("env", &[DMAIN | T1]),
    ("error_log", &[MAIN | HSL | SMAIN | SSRV | MMAIN | MSRV | M1]),
    ("error_page", &[HSL | HLIF | M2]),
    ("etag", &[HSL | FLAG]),
    ("events", &[MAIN | BLOCK | NOARGS]),
    ("expires", &[HSL | HLIF | T12]),
    ("fastcgi_buffer_size", &[HSL | T1]),
    ("fastcgi_buffering", &[HSL | FLAG]),
    ("fastcgi_buffers", &[HSL | T2]),
    ("fastcgi_busy_buffers_size", &[HSL | T1]),
    ("fastcgi_cache", &[HSL | T1]),
    ("fastcgi_cache_background_update", &[HSL | FLAG]),
    ("fastcgi_cache_bypass", &[HSL | M1]),
    ("fastcgi_cache_key", &[HSL | T1]),
    ("fastcgi_cache_lock", &[HSL | FLAG]),
    ("fastcgi_cache_lock_age", &[HSL | T1]),
    ("fastcgi_cache_lock_timeout", &[HSL | T1]),
    ("fastcgi_cache_max_range_offset", &[HSL | T1]),
    ("fastcgi_cache_methods", &[HSL | M1]),
    ("fastcgi_cache_min_uses", &[HSL | T1]),
    ("fastcgi_cache_path", &[HMAIN | M2]),
    ("fastcgi_cache_revalidate", &[HSL | FLAG]),
    ("fastcgi_cache_use_stale", &[HSL | M1]),
    ("fastcgi_cache_valid", &[HSL | M1]),
    ("fastcgi_catch_stderr", &[HSL | T1]),
    ("fastcgi_connect_timeout", &[HSL | T1]),
    ("fastcgi_force_ranges", &[HSL | FLAG]),
    ("fastcgi_hide_header", &[HSL | T1]),
    ("fastcgi_ignore_client_abort", &[HSL | FLAG]),
    ("fastcgi_ignore_headers", &[HSL | M1]),
    ("fastcgi_index", &[HSL | T1]),
    ("fastcgi_intercept_errors", &[HSL | FLAG]),
    ("fastcgi_keep_conn", &[HSL | FLAG]),
    ("fastcgi_limit_rate", &[HSL | T1]),
    ("fastcgi_max_temp_file_size", &[HSL | T1]),
    ("fastcgi_next_upstream", &[HSL | M1]),
    ("fastcgi_next_upstream_timeout", &[HSL | T1]),
    ("fastcgi_next_upstream_tries", &[HSL | T1]),
    ("fastcgi_no_cache", &[HSL | M1]),
    ("fastcgi_param", &[HSL | T23]),
    ("fastcgi_pass", &[HLOC | HLIF | T1]),
    ("fastcgi_pass_header", &[HSL | T1]),
    ("fastcgi_pass_request_body", &[HSL | FLAG]),
    ("fastcgi_pass_request_headers", &[HSL | FLAG]),
    ("fastcgi_read_timeout", &[HSL | T1]),
    ("fastcgi_request_buffering", &[HSL | FLAG]),
    ("fastcgi_send_lowat", &[HSL | T1]),
    ("fastcgi_send_timeout", &[HSL | T1]),
    ("fastcgi_socket_keepalive", &[HSL | FLAG]),
    ("fastcgi_split_path_info", &[HLOC | T1]),
    ("fastcgi_store", &[HSL | T1]),
    ("fastcgi_store_access", &[HSL | T123]),
    ("fastcgi_temp_file_write_size", &[HSL | T1]),
    ("fastcgi_temp_path", &[HSL | T1234]),
    ("flv", &[HLOC | NOARGS]),
    ("geo", &[HMAIN | BLOCK | T12, SMAIN | BLOCK | T12]),
    ("geoip_city", &[HMAIN | T12]),
    ("geoip_country", &[HMAIN | T12]),
    ("geoip_org", &[HMAIN | T12]),
    ("geoip_proxy", &[HMAIN | T1]),
    ("geoip_proxy_recursive", &[HMAIN | FLAG]),
    ("grpc_buffer_size", &[HSL | T1]),
    ("grpc_connect_timeout", &[HSL | T1]),
    ("grpc_hide_header", &[HSL | T1]),
    ("grpc_ignore_headers", &[HSL | M1]),
    ("grpc_intercept_errors", &[HSL | FLAG]),
    ("grpc_next_upstream", &[HSL | M1]),
    ("grpc_next_upstream_timeout", &[HSL | T1]),
    ("grpc_next_upstream_tries", &[HSL | T1]),
    ("grpc_pass", &[HLOC | HLIF | T1]),
    ("grpc_pass_header", &[HSL | T1]),
    ("grpc_read_timeout", &[HSL | T1]),
    ("grpc_send_timeout", &[HSL | T1]),
    ("grpc_set_header", &[HSL | T2]),
    ("grpc_socket_keepalive", &[HSL | FLAG]),
    ("gunzip", &[HSL | FLAG]),
    ("gunzip_buffers", &[HSL | T2]),
    ("gzip", &[HSL | HLIF | FLAG]),
    ("gzip_buffers", &[HSL | T2]),
    ("gzip_comp_level", &[HSL | T1]),
    ("gzip_disable", &[HSL | M1]),
    ("gzip_http_version", &[HSL | T1]),
    ("gzip_min_length", &[HSL | T1]),
    ("gzip_proxied", &[HSL | M1]),
    ("gzip_static", &[HSL | T1]),
    ("gzip_types", &[HSL | M1]),
    ("gzip_vary", &[HSL | FLAG]),
    ("hash", &[HUPS | SUPS | T12]),
    ("http", &[MAIN | BLOCK | NOARGS]),
    ("http2", &[HMAIN | HSRV | FLAG]),
    ("http2_body_preread_size", &[HMAIN | HSRV | T1]),
    ("http2_chunk_size", &[HSL | T1]),
    ("http2_max_concurrent_streams", &[HMAIN | HSRV | T1]),
    ("http2_push", &[HSL | T1]),
    ("http2_push_preload", &[HSL | FLAG]),
    ("http2_recv_buffer_size", &[HMAIN | T1]),
    ("http3", &[HMAIN | HSRV | FLAG]),
    ("http3_hq", &[HMAIN | HSRV | FLAG]),
    ("http3_max_concurrent_streams", &[HMAIN | HSRV | T1]),
    ("http3_stream_buffer_size", &[HMAIN | HSRV | T1]),
    ("if", &[HSRV | HLOC | BLOCK | M1]),
    ("if_modified_since", &[HSL | T1]),
    ("ignore_invalid_headers", &[HMAIN | HSRV | FLAG]),
    ("image_filter", &[HLOC | T123]),
    ("image_filter_buffer", &[HSL | T1]),
    ("image_filter_interlace", &[HSL | FLAG]),
    ("image_filter_jpeg_quality", &[HSL | T1]),
    ("image_filter_sharpen", &[HSL | T1]),
    ("image_filter_transparency", &[HSL | FLAG]),
    ("image_filter_webp_quality", &[HSL | T1]),
    ("imap_auth", &[MMAIN | MSRV | M1]),
    ("imap_capabilities", &[MMAIN | MSRV | M1]),
    ("imap_client_buffer", &[MMAIN | MSRV | T1]),
    ("include", &[ANYCTX | T1]),
    ("index", &[HSL | M1]),
    ("internal", &[HLOC | NOARGS]),
    ("ip_hash", &[HUPS | NOARGS]),
    ("keepalive", &[HUPS | T1]),
    ("keepalive_disable", &[HSL | T12]),
    ("keepalive_requests", &[HSL | HUPS | T1]),
    ("keepalive_time", &[HSL | HUPS | T1]),
    ("keepalive_timeout", &[HSL | HUPS | T12]),
    ("large_client_header_buffers", &[HMAIN | HSRV | T2]),
    ("least_conn", &[HUPS | SUPS | NOARGS]),
    ("limit_conn", &[HSL | T2, SMAIN | SSRV | T2]),
    ("limit_conn_dry_run", &[HSL | FLAG, SMAIN | SSRV | FLAG]),
    ("limit_conn_log_level", &[HSL | T1, SMAIN | SSRV | T1]),
    ("limit_conn_status", &[HSL | T1]),
    ("limit_conn_zone", &[HMAIN | T2, SMAIN | T2]),
    ("limit_except", &[HLOC | BLOCK | M1]),
    ("limit_rate", &[HSL | HLIF | T1]),
    ("limit_rate_after", &[HSL | HLIF | T1]),
    ("limit_req", &[HSL | M1]),
    ("limit_req_dry_run", &[HSL | FLAG]),
    ("limit_req_log_level", &[HSL | T1]),
    ("limit_req_status", &[HSL | T1]),
    ("limit_req_zone", &[HMAIN | T34]),
    ("lingering_close", &[HSL | T1]),
    ("lingering_time", &[HSL | T1]),
    ("lingering_timeout", &[HSL | T1]),
    ("listen", &[HSRV | M1, MSRV | M1, SSRV | M1]),
    ("load_module", &[DMAIN | T1]),
    ("location", &[HSRV | HLOC | BLOCK | T12]),
    ("lock_file", &[DMAIN | T1]),
    ("log_format", &[HMAIN | M2, SMAIN | M2]),
    ("log_not_found", &[HSL | FLAG]),
    ("log_subrequest", &[HSL | FLAG]),
    ("mail", &[MAIN | BLOCK | NOARGS]),
    ("map", &[HMAIN | BLOCK | T2, SMAIN | BLOCK | T2]),
    ("map_hash_bucket_size", &[HMAIN | T1, SMAIN | T1]),
    ("map_hash_max_size", &[HMAIN | T1, SMAIN | T1]),
    ("master_process", &[DMAIN | FLAG]),
    ("max_ranges", &[HSL | T1]),
    ("memcached_bind", &[HSL | T12]),
    ("memcached_buffer_size", &[HSL | T1]),
    ("memcached_connect_timeout", &[HSL | T1]),
    ("memcached_gzip_flag", &[HSL | T1]),
    ("memcached_next_upstream", &[HSL | M1]),
    ("memcached_next_upstream_timeout", &[HSL | T1]),
    ("memcached_next_upstream_tries", &[HSL | T1]),
    ("memcached_pass", &[HLOC | HLIF | T1]),
    ("memcached_read_timeout", &[HSL | T1]),
    ("memcached_send_timeout", &[HSL | T1]),
    ("merge_slashes", &[HMAIN | HSRV | FLAG]),
    ("min_delete_depth", &[HSL | T1]),
    ("mirror", &[HSL | T1]),
    ("mirror_request_body", &[HSL | FLAG]),
    ("modern_browser", &[HSL | T12]),
    ("modern_browser_value", &[HSL | T1]),
    ("mp4", &[HLOC | NOARGS]),
    ("mp4_buffer_size", &[HSL | T1]),
    ("mp4_max_buffer_size", &[HSL | T1]),
    ("msie_padding", &[HSL | FLAG]),
    ("msie_refresh", &[HSL | FLAG]),
    ("multi_accept", &[EV | FLAG]),
    ("open_file_cache", &[HSL | T12]),
    ("open_file_cache_errors", &[HSL | FLAG]),
    ("open_file_cache_min_uses", &[HSL | T1]),
    ("open_file_cache_valid", &[HSL | T1]),
    ("open_log_file_cache", &[HSL | T1234, SMAIN | SSRV | T1234]),
    ("output_buffers", &[HSL | T2]),
    ("override_charset", &[HSL | HLIF | FLAG]),
    ("pcre_jit", &[DMAIN | FLAG]),
    ("pid", &[DMAIN | T1]),
    ("pop3_auth", &[MMAIN | MSRV | M1]),
    ("pop3_capabilities", &[MMAIN | MSRV | M1]),
    ("port_in_redirect", &[HSL | FLAG]),
    ("postpone_output", &[HSL | T1]),
    ("preread_buffer_size", &[SMAIN | SSRV | T1]),
    ("preread_timeout", &[SMAIN | SSRV | T1]),
    ("protocol", &[MSRV | T1]),
    ("proxy_bind", &[HSL | T12, SMAIN | SSRV | T12]),
    ("proxy_buffer", &[MMAIN | MSRV | T1]),
    ("proxy_buffer_size", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_buffering", &[HSL | FLAG]),
    ("proxy_buffers", &[HSL | T2]),
    ("proxy_busy_buffers_size", &[HSL | T1]),
    ("proxy_cache", &[HSL | T1]),
    ("proxy_cache_background_update", &[HSL | FLAG]),
    ("proxy_cache_bypass", &[HSL | M1]),
    ("proxy_cache_convert_head", &[HSL | FLAG]),
    ("proxy_cache_key", &[HSL | T1]),
    ("proxy_cache_lock", &[HSL | FLAG]),
    ("proxy_cache_lock_age", &[HSL | T1]),
    ("proxy_cache_lock_timeout", &[HSL | T1]),
    ("proxy_cache_max_range_offset", &[HSL | T1]),
    ("proxy_cache_methods", &[HSL | M1]),
    ("proxy_cache_min_uses", &[HSL | T1]),
    ("proxy_cache_path", &[HMAIN | M2]),
    ("proxy_cache_revalidate", &[HSL | FLAG]),
    ("proxy_cache_use_stale", &[HSL | M1]),
    ("proxy_cache_valid", &[HSL | M1]),
    ("proxy_connect_timeout", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_cookie_domain", &[HSL | T12]),
    ("proxy_cookie_flags", &[HSL | M1]),
    ("proxy_cookie_path", &[HSL | T12]),
    ("proxy_download_rate", &[SMAIN | SSRV | T1]),
    ("proxy_force_ranges", &[HSL | FLAG]),
    ("proxy_half_close", &[SMAIN | SSRV | FLAG]),
    ("proxy_headers_hash_bucket_size", &[HSL | T1]),
    ("proxy_headers_hash_max_size", &[HSL | T1]),
    ("proxy_hide_header", &[HSL | T1]),
    ("proxy_http_version", &[HSL | T1]),
    ("proxy_ignore_client_abort", &[HSL | FLAG]),
    ("proxy_ignore_headers", &[HSL | M1]),
    ("proxy_intercept_errors", &[HSL | FLAG]),
    ("proxy_limit_rate", &[HSL | T1]),
    ("proxy_max_temp_file_size", &[HSL | T1]),
    ("proxy_method", &[HSL | T1]),
    ("proxy_next_upstream", &[HSL | M1, SMAIN | SSRV | FLAG]),
    ("proxy_next_upstream_timeout", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_next_upstream_tries", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_no_cache", &[HSL | M1]),
    ("proxy_pass", &[HLOC | HLIF | HLMT | T1, SSRV | T1]),
    ("proxy_pass_error_message", &[MMAIN | MSRV | FLAG]),
    ("proxy_pass_header", &[HSL | T1]),
    ("proxy_pass_request_body", &[HSL | FLAG]),
    ("proxy_pass_request_headers", &[HSL | FLAG]),
    ("proxy_protocol", &[SMAIN | SSRV | FLAG]),
    ("proxy_protocol_timeout", &[MMAIN | MSRV | T1]),
    ("proxy_read_timeout", &[HSL | T1]),
    ("proxy_redirect", &[HSL | T12]),
    ("proxy_request_buffering", &[HSL | FLAG]),
    ("proxy_send_lowat", &[HSL | T1]),
    ("proxy_send_timeout", &[HSL | T1]),
    ("proxy_set_body", &[HSL | T1]),
    ("proxy_set_header", &[HSL | T2]),
    ("proxy_socket_keepalive", &[HSL | FLAG, SMAIN | SSRV | FLAG]),
    ("proxy_ssl", &[SMAIN | SSRV | FLAG]),
    ("proxy_ssl_certificate", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_certificate_key", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_ciphers", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_crl", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_name", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_password_file", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_protocols", &[HSL | M1, SMAIN | SSRV | M1]),
    ("proxy_ssl_server_name", &[HSL | FLAG, SMAIN | SSRV | FLAG]),
    ("proxy_ssl_session_reuse", &[HSL | FLAG, SMAIN | SSRV | FLAG]),
    ("proxy_ssl_trusted_certificate", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_ssl_verify", &[HSL | FLAG, SMAIN | SSRV | FLAG]),
    ("proxy_ssl_verify_depth", &[HSL | T1, SMAIN | SSRV | T1]),
    ("proxy_store", &[HSL | T1]),
    ("proxy_store_access", &[HSL | T123]),
    ("proxy_temp_file_write_size", &[HSL | T1]),
    ("proxy_temp_path", &[HSL | T1234]),
    ("proxy_timeout", &[MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("proxy_upload_rate", &[SMAIN | SSRV | T1]),
    ("random", &[HUPS | SUPS | NOARGS | T12]),
    ("random_index", &[HLOC | FLAG]),
    ("read_ahead", &[HSL | T1]),
    ("real_ip_header", &[HSL | T1]),
    ("real_ip_recursive", &[HSL | FLAG]),
    ("recursive_error_pages", &[HSL | FLAG]),
    ("referer_hash_bucket_size", &[HSL | T1]),
    ("referer_hash_max_size", &[HSL | T1]),
    ("request_pool_size", &[HMAIN | HSRV | T1]),
    ("reset_timedout_connection", &[HSL | FLAG]),
    ("resolver", &[HSL | HUPS | M1, MMAIN | MSRV | M1, SMAIN | SSRV | SUPS | M1]),
    ("resolver_timeout", &[HSL | HUPS | T1, MMAIN | MSRV | T1, SMAIN | SSRV | SUPS | T1]),
    ("return", &[HSRV | HLOC | HSIF | HLIF | T12, SSRV | T1]),
    ("rewrite", &[HSRV | HLOC | HSIF | HLIF | T23]),
    ("rewrite_log", &[HSRV | HLOC | HSIF | HLIF | FLAG]),
    ("root", &[HSL | HLIF | T1]),
    ("satisfy", &[HSL | T1]),
    ("secure_link", &[HSL | T1]),
    ("secure_link_md5", &[HSL | T1]),
    ("secure_link_secret", &[HLOC | T1]),
    ("send_lowat", &[HSL | T1]),
    ("send_timeout", &[HSL | T1]),
    ("sendfile", &[HSL | HLIF | FLAG]),
    ("sendfile_max_chunk", &[HSL | T1]),
    ("server", &[
        HMAIN | BLOCK | NOARGS,
        HUPS | M1,
        MMAIN | BLOCK | NOARGS,
        SMAIN | BLOCK | NOARGS,
        SUPS | M1,
    ]),
    ("server_name", &[HSRV | M1, MMAIN | MSRV | T1]),
    ("server_name_in_redirect", &[HSL | FLAG]),
    ("server_names_hash_bucket_size", &[HMAIN | T1]),
    ("server_names_hash_max_size", &[HMAIN | T1]),
    ("server_tokens", &[HSL | T1]),
    ("set", &[HSRV | HLOC | HSIF | HLIF | T2, SSRV | T2]),
    ("set_real_ip_from", &[HSL | T1, SMAIN | SSRV | T1]),
    ("slice", &[HSL | T1]),
    ("smtp_auth", &[MMAIN | MSRV | M1]),
    ("smtp_capabilities", &[MMAIN | MSRV | M1]),
    ("smtp_client_buffer", &[MMAIN | MSRV | T1]),
    ("smtp_greeting_delay", &[MMAIN | MSRV | T1]),
    ("source_charset", &[HSL | HLIF | T1]),
    ("split_clients", &[HMAIN | BLOCK | T2, SMAIN | BLOCK | T2]),
    ("ssi", &[HSL | HLIF | FLAG]),
    ("ssi_last_modified", &[HSL | FLAG]),
    ("ssi_min_file_chunk", &[HSL | T1]),
    ("ssi_silent_errors", &[HSL | FLAG]),
    ("ssi_types", &[HSL | M1]),
    ("ssi_value_length", &[HSL | T1]),
    ("ssl_buffer_size", &[HMAIN | HSRV | T1]),
    ("ssl_certificate", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_certificate_key", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_ciphers", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_client_certificate", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_conf_command", &[HMAIN | HSRV | T2, MMAIN | MSRV | T2, SMAIN | SSRV | T2]),
    ("ssl_crl", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_dhparam", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_early_data", &[HMAIN | HSRV | FLAG]),
    ("ssl_ecdh_curve", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_engine", &[DMAIN | T1]),
    ("ssl_handshake_timeout", &[SMAIN | SSRV | T1]),
    ("ssl_ocsp", &[HMAIN | HSRV | T1]),
    ("ssl_ocsp_cache", &[HMAIN | HSRV | T1]),
    ("ssl_ocsp_responder", &[HMAIN | HSRV | T1]),
    ("ssl_password_file", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_prefer_server_ciphers", &[HMAIN | HSRV | FLAG, MMAIN | MSRV | FLAG, SMAIN | SSRV | FLAG]),
    ("ssl_protocols", &[HMAIN | HSRV | M1, MMAIN | MSRV | M1, SMAIN | SSRV | M1]),
    ("ssl_reject_handshake", &[HMAIN | HSRV | FLAG]),
    ("ssl_session_cache", &[HMAIN | HSRV | T12, MMAIN | MSRV | T12, SMAIN | SSRV | T12]),
    ("ssl_session_ticket_key", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_session_tickets", &[HMAIN | HSRV | FLAG, MMAIN | MSRV | FLAG, SMAIN | SSRV | FLAG]),
    ("ssl_session_timeout", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_stapling", &[HMAIN | HSRV | FLAG]),
    ("ssl_stapling_file", &[HMAIN | HSRV | T1]),
    ("ssl_stapling_responder", &[HMAIN | HSRV | T1]),
    ("ssl_stapling_verify", &[HMAIN | HSRV | FLAG]),
    ("ssl_trusted_certificate", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_verify_client", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("ssl_verify_depth", &[HMAIN | HSRV | T1, MMAIN | MSRV | T1, SMAIN | SSRV | T1]),
    ("starttls", &[MMAIN | MSRV | T1]),
    ("stream", &[MAIN | BLOCK | NOARGS]),
    ("stub_status", &[HSRV | HLOC | NOARGS | T1]),
    ("sub_filter", &[HSL | T2]),
    ("sub_filter_last_modified", &[HSL | FLAG]),
    ("sub_filter_once", &[HSL | FLAG]),
    ("sub_filter_types", &[HSL | M1]),
    ("subrequest_output_buffer_size", &[HSL | T1]),
    ("tcp_nodelay", &[HSL | FLAG, SMAIN | SSRV | FLAG]),
    ("tcp_nopush", &[HSL | FLAG]),
    ("thread_pool", &[DMAIN | T23]),
    ("timeout", &[MMAIN | MSRV | T1]),
    ("timer_resolution", &[DMAIN | T1]),
    ("try_files", &[HSRV | HLOC | M2]),
    ("types", &[HSL | BLOCK | NOARGS]),
    ("types_hash_bucket_size", &[HSL | T1]),
    ("types_hash_max_size", &[HSL | T1]),
    ("underscores_in_headers", &[HMAIN | HSRV | FLAG]),
    ("uninitialized_variable_warn", &[HSRV | HLOC | HSIF | HLIF | FLAG]),
    ("upstream", &[HMAIN | BLOCK | T1, SMAIN | BLOCK | T1]),
    ("use", &[EV | T1]),
    ("user", &[DMAIN | T12]),
    ("userid", &[HSL | T1]),
    ("userid_domain", &[HSL | T1]),
    ("userid_expires", &[HSL | T1]),
    ("userid_mark", &[HSL | T1]),
    ("userid_name", &[HSL | T1]),
    ("userid_p3p", &[HSL | T1]),
    ("userid_path", &[HSL | T1]),
    ("userid_service", &[HSL | T1]),
    ("uwsgi_buffer_size", &[HSL | T1]),
    ("uwsgi_buffering", &[HSL | FLAG]),
    ("uwsgi_buffers", &[HSL | T2]),
    ("uwsgi_busy_buffers_size", &[HSL | T1]),
    ("uwsgi_cache", &[HSL | T1]),
    ("uwsgi_cache_key", &[HSL | T1]),
    ("uwsgi_cache_path", &[HMAIN | M2]),
    ("uwsgi_connect_timeout", &[HSL | T1]),
    ("uwsgi_hide_header", &[HSL | T1]),
    ("uwsgi_intercept_errors", &[HSL | FLAG]),
    ("uwsgi_next_upstream", &[HSL | M1]),
    ("uwsgi_param", &[HSL | T23]),
    ("uwsgi_pass", &[HLOC | HLIF | T1]),
    ("uwsgi_pass_header", &[HSL | T1]),
    ("uwsgi_read_timeout", &[HSL | T1]),
    ("uwsgi_send_timeout", &[HSL | T1]),
    ("valid_referers", &[HSRV | HLOC | M1]),
    ("variables_hash_bucket_size", &[HMAIN | T1, SMAIN | T1]),
    ("variables_hash_max_size", &[HMAIN | T1, SMAIN | T1]),
    ("worker_aio_requests", &[EV | T1]),
    ("worker_connections", &[EV | T1]),
    ("worker_cpu_affinity", &[DMAIN | M1]),
    ("worker_priority", &[DMAIN | T1]),
    ("worker_processes", &[DMAIN | T1]),
    ("worker_rlimit_core", &[DMAIN | T1]),
    ("worker_rlimit_nofile", &[DMAIN | T1]),
    ("worker_shutdown_timeout", &[DMAIN | T1]),
    ("working_directory", &[DMAIN | T1]),
    ("xml_entities", &[HSL | T1]),
    ("xslt_last_modified", &[HSL | FLAG]),
    ("xslt_param", &[HSL | T2]),
    ("xslt_string_param", &[HSL | T2]),
    ("xslt_stylesheet", &[HLOC | M1]),
    ("xslt_types", &[HSL | M1]),
    ("zone", &[HUPS | T12, SUPS | T12]),
];

/// Masks for a built-in directive, or `None` when it is not in the table.
pub fn masks(name: &str) -> Option<&'static [u64]> {
    table().get(name).copied()
}

fn table() -> &'static HashMap<&'static str, &'static [u64]> {
    static TABLE: OnceLock<HashMap<&'static str, &'static [u64]>> = OnceLock::new();
    TABLE.get_or_init(|| DIRECTIVES.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_directives_present() {
        for name in [
            "events",
            "http",
            "server",
            "location",
            "listen",
            "include",
            "proxy_pass",
            "worker_connections",
        ] {
            assert!(masks(name).is_some(), "missing catalog entry: {name}");
        }
    }

    #[test]
    fn unknown_directive_absent() {
        assert!(masks("proxy_passs").is_none());
    }

    #[test]
    fn server_has_one_form_per_context_family() {
        let forms = masks("server").expect("server entry");
        assert_eq!(forms.len(), 5);
    }

    #[test]
    fn no_duplicate_names() {
        let table = table();
        assert_eq!(table.len(), DIRECTIVES.len());
    }
}
